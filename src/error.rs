//! 错误类型

use std::io;
use std::path::PathBuf;

/// 请求翻译服务时的错误
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("请求 {endpoint} 失败: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: ureq::Error,
    },

    #[error("{endpoint} 返回状态码 {status}")]
    Status { endpoint: String, status: u16 },

    #[error("读取 {endpoint} 响应失败: {source}")]
    Read {
        endpoint: String,
        #[source]
        source: ureq::Error,
    },

    #[error("解析 {endpoint} 响应失败: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ClientError {
    /// 将 ureq 错误按状态码/传输层归类
    pub(crate) fn from_ureq(endpoint: &str, err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(status) => Self::Status {
                endpoint: endpoint.to_string(),
                status,
            },
            source => Self::Transport {
                endpoint: endpoint.to_string(),
                source,
            },
        }
    }
}

/// 配置文件错误
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("无法读取配置文件 {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("配置文件 {path} 格式错误: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("无法获取用户{0}目录")]
    NoUserDir(&'static str),
}

/// 导出结果文件的错误
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("暂无可导出的结果")]
    NothingToExport,

    #[error("写入 {path} 失败: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

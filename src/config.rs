//! 配置 (~/.config/translens/config.toml)
//!
//! 优先级：默认值 < 配置文件 < 命令行参数

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";
const APP_DIR: &str = "translens";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// 翻译服务地址（不含 /api/v0）
    pub server_url: String,
    /// 请求超时，未设置或为 0 表示不限时
    pub timeout_secs: Option<u64>,
    /// translation_results.txt 的输出目录
    pub export_dir: PathBuf,
    /// 日志文件，未设置时使用数据目录下的 translens.log
    pub log_file: Option<PathBuf>,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            timeout_secs: None,
            export_dir: PathBuf::from("."),
            log_file: None,
            log_level: "info".to_string(),
        }
    }
}

/// 命令行中可覆盖的配置项
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub server_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub export_dir: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    /// 从 TOML 文件加载；文件不存在时返回默认配置
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// 显式指定的配置文件必须存在，否则读取默认位置（可缺省）
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) if !path.exists() => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "文件不存在"),
            }),
            Some(path) => Self::load(path),
            None => match default_config_path() {
                Ok(path) => Self::load(&path),
                Err(_) => Ok(Self::default()),
            },
        }
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(url) = overrides.server_url {
            self.server_url = url;
        }
        if let Some(secs) = overrides.timeout_secs {
            self.timeout_secs = Some(secs);
        }
        if let Some(dir) = overrides.export_dir {
            self.export_dir = dir;
        }
        if let Some(file) = overrides.log_file {
            self.log_file = Some(file);
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    pub fn log_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.log_file {
            Some(path) => Ok(path.clone()),
            None => Ok(get_data_dir()?.join("translens.log")),
        }
    }
}

/// 默认配置文件路径 (~/.config/translens/config.toml)
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    Ok(dirs::config_dir()
        .ok_or(ConfigError::NoUserDir("配置"))?
        .join(APP_DIR)
        .join("config.toml"))
}

/// 数据目录 (~/.local/share/translens/)
fn get_data_dir() -> Result<PathBuf, ConfigError> {
    Ok(dirs::data_dir()
        .ok_or(ConfigError::NoUserDir("数据"))?
        .join(APP_DIR))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.server_url, DEFAULT_SERVER_URL);
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "server_url = \"http://analysis:9000\"\ntimeout_secs = 30\n").unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.server_url, "http://analysis:9000");
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.export_dir, PathBuf::from("."));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_cli_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "server_url = \"http://file:1\"\nexport_dir = \"/tmp/file\"\n").unwrap();

        let mut config = AppConfig::resolve(Some(&path)).unwrap();
        config.apply_overrides(ConfigOverrides {
            server_url: Some("http://cli:2".to_string()),
            timeout_secs: Some(0),
            ..Default::default()
        });
        assert_eq!(config.server_url, "http://cli:2");
        assert_eq!(config.export_dir, PathBuf::from("/tmp/file"));
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "server_url = [").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = AppConfig::resolve(Some(&dir.path().join("nope.toml")));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_explicit_log_file_wins() {
        let config = AppConfig {
            log_file: Some(PathBuf::from("/tmp/t.log")),
            ..AppConfig::default()
        };
        assert_eq!(config.log_path().unwrap(), PathBuf::from("/tmp/t.log"));
    }
}

//! 翻译服务客户端
//!
//! 服务端只暴露两个接口：
//! - `POST /api/v0/translation`：返回原文与译文的词频、语法信息
//! - `POST /api/v0/tree`：返回单句语法树的 PNG 图片

use std::time::Duration;

use tracing::{debug, warn};

use crate::error::ClientError;
use crate::models::{AnalysisResult, TextRequest, TreeImage};

pub const TRANSLATION_ENDPOINT: &str = "/api/v0/translation";
pub const TREE_ENDPOINT: &str = "/api/v0/tree";

/// 图片响应体的读取上限
const MAX_IMAGE_BYTES: u64 = 64 * 1024 * 1024;

/// 翻译服务接口，UI 与后台线程只依赖这个 trait
pub trait TranslationService: Send + Sync {
    /// 提交整段文本，获取原文与译文的分析结果
    fn analyze(&self, text: &str) -> Result<AnalysisResult, ClientError>;

    /// 提交单个句子，获取渲染好的语法树图片
    fn syntax_tree(&self, sentence: &str) -> Result<TreeImage, ClientError>;
}

/// 基于 ureq 的阻塞式 HTTP 客户端
pub struct HttpClient {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(timeout)
            .build();
        Self {
            agent: config.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}

impl TranslationService for HttpClient {
    fn analyze(&self, text: &str) -> Result<AnalysisResult, ClientError> {
        let url = self.url(TRANSLATION_ENDPOINT);
        debug!(%url, chars = text.chars().count(), "发送分析请求");

        let response = self
            .agent
            .post(&url)
            .send_json(TextRequest::new(text))
            .map_err(|e| ClientError::from_ureq(TRANSLATION_ENDPOINT, e))?;

        let body = response
            .into_body()
            .read_to_string()
            .map_err(|source| ClientError::Read {
                endpoint: TRANSLATION_ENDPOINT.to_string(),
                source,
            })?;

        let result: AnalysisResult =
            serde_json::from_str(&body).map_err(|source| ClientError::Decode {
                endpoint: TRANSLATION_ENDPOINT.to_string(),
                source,
            })?;

        if !result.is_consistent() {
            warn!(
                original = result.original_text_analysis.words_count,
                translated = result.translated_text_analysis.words_count,
                "words_count 与单词列表长度不一致"
            );
        }
        Ok(result)
    }

    fn syntax_tree(&self, sentence: &str) -> Result<TreeImage, ClientError> {
        let url = self.url(TREE_ENDPOINT);
        debug!(%url, sentence, "发送语法树请求");

        let response = self
            .agent
            .post(&url)
            .send_json(TextRequest::new(sentence))
            .map_err(|e| ClientError::from_ureq(TREE_ENDPOINT, e))?;

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let bytes = response
            .into_body()
            .into_with_config()
            .limit(MAX_IMAGE_BYTES)
            .read_to_vec()
            .map_err(|source| ClientError::Read {
                endpoint: TREE_ENDPOINT.to_string(),
                source,
            })?;

        let image = TreeImage::new(bytes, content_type);
        if !image.is_png() {
            warn!(content_type = ?image.content_type, "语法树响应不是 PNG");
        }
        Ok(image)
    }
}

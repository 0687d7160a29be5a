use serde::{Deserialize, Serialize};

/// 单词信息（服务端返回）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordInfo {
    pub word: String,
    #[serde(rename = "freq")]
    pub frequency: u32,
    #[serde(rename = "gram_info", default)]
    pub grammatical_info: String,
}

/// 单侧文本的分析结果
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextAnalysis {
    pub words_count: usize,
    #[serde(default)]
    pub words_info: Vec<WordInfo>,
}

impl TextAnalysis {
    /// 计数是否与单词列表长度一致（由服务端保证，客户端只做检查）
    pub fn is_consistent(&self) -> bool {
        self.words_count == self.words_info.len()
    }

    /// 出现次数之和
    pub fn total_occurrences(&self) -> u64 {
        self.words_info.iter().map(|w| u64::from(w.frequency)).sum()
    }
}

/// `/api/v0/translation` 的响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub original_text: String,
    pub original_text_analysis: TextAnalysis,
    pub translated_text: String,
    pub translated_text_analysis: TextAnalysis,
}

impl AnalysisResult {
    pub fn is_consistent(&self) -> bool {
        self.original_text_analysis.is_consistent() && self.translated_text_analysis.is_consistent()
    }
}

/// 两个接口共用的请求体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextRequest {
    pub text: String,
}

impl TextRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

/// `/api/v0/tree` 返回的语法树图片（不透明的二进制）
#[derive(Debug, Clone, PartialEq)]
pub struct TreeImage {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

impl TreeImage {
    pub fn new(bytes: Vec<u8>, content_type: Option<String>) -> Self {
        Self {
            bytes,
            content_type,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn is_png(&self) -> bool {
        self.bytes.starts_with(&PNG_SIGNATURE)
    }

    /// 从 IHDR 块读取宽高，非 PNG 时返回 None
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        if !self.is_png() || self.bytes.len() < 24 || &self.bytes[12..16] != b"IHDR" {
            return None;
        }
        let width = u32::from_be_bytes(self.bytes[16..20].try_into().ok()?);
        let height = u32::from_be_bytes(self.bytes[20..24].try_into().ok()?);
        Some((width, height))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub const SAMPLE_RESPONSE: &str = r#"{
        "original_text": "The cat sees the cat. It runs!",
        "original_text_analysis": {
            "words_count": 3,
            "words_info": [
                {"word": "cat", "freq": 2, "gram_info": "существительное в единственном числе"},
                {"word": "sees", "freq": 1, "gram_info": "глагол, настоящее время, 3-е лицо"},
                {"word": "runs", "freq": 1, "gram_info": "глагол, настоящее время, 3-е лицо"}
            ]
        },
        "translated_text": "Le chat voit le chat. Il court !",
        "translated_text_analysis": {
            "words_count": 3,
            "words_info": [
                {"word": "chat", "freq": 2, "gram_info": "существительное"},
                {"word": "voit", "freq": 1, "gram_info": "глагол"},
                {"word": "court", "freq": 1, "gram_info": "глагол"}
            ]
        }
    }"#;

    pub fn sample_result() -> AnalysisResult {
        serde_json::from_str(SAMPLE_RESPONSE).unwrap()
    }

    /// 最小的 1x1 PNG 头部（签名 + IHDR）
    pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = PNG_SIGNATURE.to_vec();
        bytes.extend_from_slice(&13u32.to_be_bytes());
        bytes.extend_from_slice(b"IHDR");
        bytes.extend_from_slice(&width.to_be_bytes());
        bytes.extend_from_slice(&height.to_be_bytes());
        bytes.extend_from_slice(&[8, 6, 0, 0, 0]);
        bytes
    }
}

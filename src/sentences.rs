//! 客户端分句
//!
//! 按 `.` `!` `?` 切分，标点归入前一句，句首空白保留在后一句中。

use std::sync::LazyLock;

use regex::Regex;

static SENTENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^.!?]+(?:[.!?]+|$)").expect("sentence pattern is valid")
});

/// 将文本切分为句子；末尾没有标点的片段也算一句，纯空白片段丢弃
pub fn split_sentences(text: &str) -> Vec<String> {
    SENTENCE_RE
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
        .collect()
}

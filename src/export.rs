//! 结果导出 (translation_results.txt)

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::error::ExportError;
use crate::models::{AnalysisResult, TextAnalysis};

pub const EXPORT_FILE_NAME: &str = "translation_results.txt";

/// 生成导出文本：原文与译文各一段，每段附带词表
pub fn render_report(result: &AnalysisResult, generated_at: DateTime<Local>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "翻译结果");
    let _ = writeln!(out, "生成时间: {}", generated_at.format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(out);

    render_section(
        &mut out,
        "原文",
        &result.original_text,
        &result.original_text_analysis,
    );
    let _ = writeln!(out);
    render_section(
        &mut out,
        "译文",
        &result.translated_text,
        &result.translated_text_analysis,
    );
    out
}

fn render_section(out: &mut String, title: &str, text: &str, analysis: &TextAnalysis) {
    let _ = writeln!(out, "== {} ==", title);
    let _ = writeln!(out, "{}", text.trim_end());
    let _ = writeln!(out);
    let _ = writeln!(out, "单词数: {}", analysis.words_count);
    out.push_str(&render_word_table(analysis));
}

/// 纯文本词表，命令行输出也复用它
pub fn render_word_table(analysis: &TextAnalysis) -> String {
    let word_width = analysis
        .words_info
        .iter()
        .map(|w| w.word.chars().count())
        .max()
        .unwrap_or(0)
        .max("单词".chars().count());

    let mut out = String::new();
    let _ = writeln!(out, "{:<word_width$}  {:>4}  语法信息", "单词", "频次");
    for info in &analysis.words_info {
        let _ = writeln!(
            out,
            "{:<word_width$}  {:>4}  {}",
            info.word, info.frequency, info.grammatical_info
        );
    }
    out
}

/// 写入 `<dir>/translation_results.txt`，覆盖已有文件
pub fn write_report(dir: &Path, result: Option<&AnalysisResult>) -> Result<PathBuf, ExportError> {
    let result = result.ok_or(ExportError::NothingToExport)?;
    let path = dir.join(EXPORT_FILE_NAME);

    fs::create_dir_all(dir).map_err(|source| ExportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    fs::write(&path, render_report(result, Local::now())).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;

    Ok(path)
}

//! 命令行参数与非交互子命令

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use crate::client::TranslationService;
use crate::config::ConfigOverrides;
use crate::export;
use crate::sentences::split_sentences;

/// translens - 翻译与词法分析终端客户端
///
/// 不带子命令时启动交互界面。
#[derive(Parser, Debug)]
#[command(name = "translens")]
#[command(version)]
#[command(about = "Terminal client for the translation/analysis service", long_about = None)]
pub struct Cli {
    /// 翻译服务地址，例如 http://127.0.0.1:8000
    #[arg(long, global = true, value_name = "URL")]
    pub server: Option<String>,

    /// 配置文件路径（默认 ~/.config/translens/config.toml）
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// 请求超时（秒），0 表示不限时
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// translation_results.txt 的输出目录
    #[arg(long, global = true, value_name = "DIR")]
    pub export_dir: Option<PathBuf>,

    /// 日志文件（仅交互界面使用）
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// 分析文本并打印原文与译文词表
    Analyze(AnalyzeArgs),
    /// 生成单句语法树并保存为 PNG
    Tree(TreeArgs),
    /// 本地分句，每行输出一句
    Split(TextArgs),
}

/// 文本来源：参数、文件或标准输入
#[derive(Args, Debug)]
pub struct TextArgs {
    #[arg(value_name = "TEXT", conflicts_with = "file")]
    pub text: Option<String>,

    #[arg(long, short, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub input: TextArgs,

    /// 同时写出 translation_results.txt
    #[arg(long)]
    pub export: bool,
}

#[derive(Args, Debug)]
pub struct TreeArgs {
    #[arg(value_name = "SENTENCE")]
    pub sentence: String,

    /// 输出 PNG 路径
    #[arg(long, short, value_name = "PATH")]
    pub out: PathBuf,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            server_url: self.server.clone(),
            timeout_secs: self.timeout,
            export_dir: self.export_dir.clone(),
            log_file: self.log_file.clone(),
        }
    }
}

impl TextArgs {
    pub fn read(&self) -> Result<String> {
        let text = match (&self.text, &self.file) {
            (Some(text), _) => text.clone(),
            (None, Some(path)) => fs::read_to_string(path)
                .with_context(|| format!("无法读取 {}", path.display()))?,
            (None, None) => {
                let mut buf = String::new();
                io::stdin()
                    .read_to_string(&mut buf)
                    .context("无法读取标准输入")?;
                buf
            }
        };
        Ok(text)
    }
}

/// `translens analyze`
pub fn run_analyze(
    service: &dyn TranslationService,
    args: &AnalyzeArgs,
    export_dir: &Path,
    out: &mut impl Write,
) -> Result<()> {
    let text = args.input.read()?;
    if text.trim().is_empty() {
        bail!("输入文本为空");
    }

    let result = service.analyze(&text).context("分析请求失败")?;

    writeln!(out, "== 原文 ==")?;
    writeln!(out, "{}", result.original_text.trim_end())?;
    writeln!(out, "单词数: {}", result.original_text_analysis.words_count)?;
    write!(out, "{}", export::render_word_table(&result.original_text_analysis))?;
    writeln!(out)?;
    writeln!(out, "== 译文 ==")?;
    writeln!(out, "{}", result.translated_text.trim_end())?;
    writeln!(out, "单词数: {}", result.translated_text_analysis.words_count)?;
    write!(out, "{}", export::render_word_table(&result.translated_text_analysis))?;

    if args.export {
        let path = export::write_report(export_dir, Some(&result))?;
        info!(path = %path.display(), "结果已导出");
        writeln!(out)?;
        writeln!(out, "已导出到 {}", path.display())?;
    }
    Ok(())
}

/// `translens tree`
pub fn run_tree(service: &dyn TranslationService, args: &TreeArgs, out: &mut impl Write) -> Result<()> {
    if args.sentence.trim().is_empty() {
        bail!("句子为空");
    }

    let image = service
        .syntax_tree(&args.sentence)
        .context("语法树请求失败")?;
    fs::write(&args.out, &image.bytes)
        .with_context(|| format!("无法写入 {}", args.out.display()))?;

    match image.dimensions() {
        Some((w, h)) => writeln!(out, "{} ({}x{}, {} 字节)", args.out.display(), w, h, image.len())?,
        None => writeln!(out, "{} ({} 字节)", args.out.display(), image.len())?,
    }
    Ok(())
}

/// `translens split`
pub fn run_split(args: &TextArgs, out: &mut impl Write) -> Result<()> {
    let text = args.read()?;
    for sentence in split_sentences(&text) {
        writeln!(out, "{}", sentence.trim())?;
    }
    Ok(())
}

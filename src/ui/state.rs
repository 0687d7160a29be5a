//! App 状态定义 (Model)
//!
//! 包含应用状态结构体及相关枚举

use std::path::PathBuf;

use uuid::Uuid;

use crate::artifact::TreeArtifact;
use crate::models::{AnalysisResult, TextAnalysis};
use crate::worker::Worker;

/// 应用状态
pub struct App {
    pub worker: Worker,
    pub export_dir: PathBuf,
    pub mode: AppMode,
    pub input_buffer: String,
    pub sentences: Vec<String>,
    pub selected_index: usize, // 当前选中的句子
    pub focus: Panel,
    pub original_offset: usize,
    pub translated_offset: usize,
    pub result: Option<AnalysisResult>,
    pub tree: Option<TreeArtifact>,
    pub pending_analysis: Option<Uuid>, // 最近一次分析请求
    pub pending_tree: Option<Uuid>,     // 最近一次语法树请求
    pub message: Option<String>,
}

/// 应用模式
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppMode {
    Normal,
    Editing,
    Help,
}

/// 词表面板
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Panel {
    Original,
    Translated,
}

impl Panel {
    pub fn toggle(self) -> Self {
        match self {
            Panel::Original => Panel::Translated,
            Panel::Translated => Panel::Original,
        }
    }
}

impl App {
    /// 创建新的应用实例，启动后直接进入输入模式
    pub fn new(worker: Worker, export_dir: PathBuf) -> Self {
        Self {
            worker,
            export_dir,
            mode: AppMode::Editing,
            input_buffer: String::new(),
            sentences: Vec::new(),
            selected_index: 0,
            focus: Panel::Original,
            original_offset: 0,
            translated_offset: 0,
            result: None,
            tree: None,
            pending_analysis: None,
            pending_tree: None,
            message: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.pending_analysis.is_some()
    }

    pub fn is_tree_loading(&self) -> bool {
        self.pending_tree.is_some()
    }

    /// 获取当前选中的句子
    pub fn selected_sentence(&self) -> Option<&str> {
        self.sentences.get(self.selected_index).map(String::as_str)
    }

    /// 面板对应的分析结果
    pub fn analysis(&self, panel: Panel) -> Option<&TextAnalysis> {
        self.result.as_ref().map(|r| match panel {
            Panel::Original => &r.original_text_analysis,
            Panel::Translated => &r.translated_text_analysis,
        })
    }

    pub fn offset(&self, panel: Panel) -> usize {
        match panel {
            Panel::Original => self.original_offset,
            Panel::Translated => self.translated_offset,
        }
    }

    pub(crate) fn offset_mut(&mut self, panel: Panel) -> &mut usize {
        match panel {
            Panel::Original => &mut self.original_offset,
            Panel::Translated => &mut self.translated_offset,
        }
    }
}

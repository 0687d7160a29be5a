//! 业务逻辑处理 (Update/Dispatch)
//!
//! 包含核心的 dispatch 逻辑、请求发起以及后台结果的应用

use tracing::{debug, error, info, warn};

use super::actions::Action;
use super::state::{App, AppMode, Panel};
use crate::artifact::TreeArtifact;
use crate::export;
use crate::sentences::split_sentences;
use crate::worker::{Job, Outcome, WorkerEvent};

impl App {
    /// 核心逻辑分发
    pub fn dispatch(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return true,
            Action::MoveSelectionUp => self.move_up(),
            Action::MoveSelectionDown => self.move_down(),

            Action::SubmitText => self.submit_text(),
            Action::GenerateTree => self.generate_tree(),
            Action::ExportResults => self.export_results(),

            Action::SwitchPanel => self.focus = self.focus.toggle(),
            Action::ScrollUp => self.scroll_up(),
            Action::ScrollDown => self.scroll_down(),

            Action::StartEditing => {
                self.mode = AppMode::Editing;
                self.message = None;
            }
            Action::StopEditing => self.mode = AppMode::Normal,
            Action::ClearInput => {
                self.input_buffer.clear();
                self.message = None;
            }

            Action::Input(c) => {
                if self.mode == AppMode::Editing {
                    self.input_buffer.push(c);
                }
            }
            Action::Newline => {
                if self.mode == AppMode::Editing {
                    self.input_buffer.push('\n');
                }
            }
            Action::DeleteChar => {
                if self.mode == AppMode::Editing {
                    self.input_buffer.pop();
                }
            }
            Action::Paste(text) => {
                if self.mode == AppMode::Editing {
                    self.input_buffer.push_str(&text.replace("\r\n", "\n"));
                }
            }

            Action::ToggleHelp => self.mode = AppMode::Help,
            Action::Cancel => self.cancel(),
        }
        false
    }

    // ============ 导航相关 ============

    /// 向上移动选择
    pub fn move_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// 向下移动选择
    pub fn move_down(&mut self) {
        if self.selected_index + 1 < self.sentences.len() {
            self.selected_index += 1;
        }
    }

    pub fn scroll_up(&mut self) {
        let offset = self.offset_mut(self.focus);
        *offset = offset.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        let len = self
            .analysis(self.focus)
            .map_or(0, |analysis| analysis.words_info.len());
        let offset = self.offset_mut(self.focus);
        if *offset + 1 < len {
            *offset += 1;
        }
    }

    // ============ 请求相关 ============

    /// 提交输入文本进行分析
    pub fn submit_text(&mut self) {
        if self.input_buffer.trim().is_empty() {
            self.message = Some("请先输入文本".to_string());
            return;
        }

        let text = self.input_buffer.clone();
        self.sentences = split_sentences(&text);
        self.selected_index = 0;
        self.tree = None;
        self.pending_tree = None;
        self.mode = AppMode::Normal;
        self.message = None;

        let id = self.worker.submit(Job::Analyze { text });
        info!(%id, sentences = self.sentences.len(), "已提交分析请求");
        self.pending_analysis = Some(id);
    }

    /// 为选中的句子生成语法树
    pub fn generate_tree(&mut self) {
        let Some(sentence) = self.selected_sentence().map(str::to_string) else {
            self.message = Some("没有可选的句子，请先提交文本".to_string());
            return;
        };

        self.message = None;
        let id = self.worker.submit(Job::Tree { sentence });
        info!(%id, index = self.selected_index, "已提交语法树请求");
        self.pending_tree = Some(id);
    }

    /// 将最近一次结果导出为 translation_results.txt
    pub fn export_results(&mut self) {
        match export::write_report(&self.export_dir, self.result.as_ref()) {
            Ok(path) => {
                info!(path = %path.display(), "结果已导出");
                self.message = Some(format!("已导出到 {}", path.display()));
            }
            Err(e) => {
                warn!(error = %e, "导出失败");
                self.message = Some(e.to_string());
            }
        }
    }

    // ============ 后台结果 ============

    /// 取出所有已完成的请求并应用，返回是否有状态变化
    pub fn poll_worker(&mut self) -> bool {
        let mut changed = false;
        while let Some(event) = self.worker.try_recv() {
            self.apply(event);
            changed = true;
        }
        changed
    }

    /// 应用一个请求结果；只有最近一次请求的结果会被采用
    pub fn apply(&mut self, event: WorkerEvent) {
        let WorkerEvent { id, outcome } = event;
        match outcome {
            Outcome::Analysis(result) => {
                if self.pending_analysis != Some(id) {
                    debug!(%id, "丢弃过期的分析结果");
                    return;
                }
                self.pending_analysis = None;

                match result {
                    Ok(result) => {
                        info!(
                            %id,
                            original_words = result.original_text_analysis.words_count,
                            translated_words = result.translated_text_analysis.words_count,
                            "分析完成"
                        );
                        self.result = Some(result);
                        self.original_offset = 0;
                        self.translated_offset = 0;
                        self.focus = Panel::Original;
                    }
                    Err(e) => error!(%id, error = %e, "分析请求失败"),
                }
            }
            Outcome::Tree { sentence, result } => {
                if self.pending_tree != Some(id) {
                    debug!(%id, "丢弃过期的语法树");
                    return;
                }
                self.pending_tree = None;

                match result.map(|image| TreeArtifact::create(&image, &sentence)) {
                    Ok(Ok(artifact)) => {
                        info!(%id, path = %artifact.path().display(), "语法树已生成");
                        self.tree = Some(artifact);
                    }
                    Ok(Err(e)) => error!(%id, error = %e, "写入语法树图片失败"),
                    Err(e) => error!(%id, error = %e, "语法树请求失败"),
                }
            }
        }
    }

    // ============ 通用操作 ============

    /// 取消当前操作
    pub fn cancel(&mut self) {
        self.mode = AppMode::Normal;
        self.message = None;
    }
}

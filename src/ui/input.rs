//! 键盘事件映射 (Input -> Action)
//!
//! 将按键事件转换为 Action

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::actions::Action;
use super::state::{App, AppMode};

/// 根据当前模式和按键获取对应的 Action
pub fn get_action(mode: AppMode, key: KeyEvent) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match mode {
        AppMode::Normal => match key.code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::MoveSelectionDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::MoveSelectionUp),
            KeyCode::Char('i') | KeyCode::Char('e') => Some(Action::StartEditing),
            KeyCode::Char('s') | KeyCode::Enter => Some(Action::SubmitText),
            KeyCode::Char('t') => Some(Action::GenerateTree),
            KeyCode::Char('d') => Some(Action::ExportResults),
            KeyCode::Char('c') => Some(Action::ClearInput),
            KeyCode::Tab => Some(Action::SwitchPanel),
            KeyCode::PageUp | KeyCode::Char('K') => Some(Action::ScrollUp),
            KeyCode::PageDown | KeyCode::Char('J') => Some(Action::ScrollDown),
            KeyCode::Char('?') => Some(Action::ToggleHelp),
            _ => None,
        },
        AppMode::Editing => match key.code {
            KeyCode::Esc => Some(Action::StopEditing),
            KeyCode::Char('s') if ctrl => Some(Action::SubmitText),
            KeyCode::Char('u') if ctrl => Some(Action::ClearInput),
            KeyCode::Enter => Some(Action::Newline),
            KeyCode::Backspace => Some(Action::DeleteChar),
            KeyCode::Char(c) if !ctrl => Some(Action::Input(c)),
            _ => None,
        },
        AppMode::Help => match key.code {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => Some(Action::Cancel),
            _ => None,
        },
    }
}

/// 处理按键事件，返回 true 表示退出
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> bool {
    match get_action(app.mode, key) {
        Some(action) => app.dispatch(action),
        None => false,
    }
}

/// 处理粘贴事件（bracketed paste）
pub fn handle_paste(app: &mut App, text: String) -> bool {
    if app.mode == AppMode::Editing {
        app.dispatch(Action::Paste(text))
    } else {
        false
    }
}

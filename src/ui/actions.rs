//! Action 枚举定义 (Intent)
//!
//! 用户交互转化为明确的语义化 Action

/// 用户操作枚举
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    MoveSelectionUp,
    MoveSelectionDown,

    // 请求与导出
    SubmitText,
    GenerateTree,
    ExportResults,

    // 词表浏览
    SwitchPanel,
    ScrollUp,
    ScrollDown,

    // 输入框
    StartEditing,
    StopEditing,
    ClearInput,
    Input(char),
    Newline,
    DeleteChar,
    Paste(String),

    ToggleHelp,
    Cancel, // Esc
}

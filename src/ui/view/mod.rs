//! 视图层模块
//!
//! 包含主渲染入口和各种视图组件

pub mod components;
pub mod layouts;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use super::state::{App, AppMode, Panel};
use components::{render_dialog_framework, render_input_widget, render_word_table};
use layouts::centered_rect;

/// 渲染 UI
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // 标题
            Constraint::Min(10),   // 主体
            Constraint::Length(3), // 帮助
        ])
        .split(frame.area());

    render_title(frame, app, chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(columns[0]);

    render_input_widget(
        frame,
        left[0],
        "输入文本",
        &app.input_buffer,
        app.mode == AppMode::Editing,
        Color::Yellow,
    );
    render_sentences(frame, app, left[1]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(50),
            Constraint::Percentage(50),
            Constraint::Length(5),
        ])
        .split(columns[1]);

    render_panel(frame, app, Panel::Original, right[0]);
    render_panel(frame, app, Panel::Translated, right[1]);
    render_tree(frame, app, right[2]);

    render_help(frame, app, chunks[2]);

    if app.mode == AppMode::Help {
        render_help_dialog(frame);
    }
}

fn render_title(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(
        "translens 翻译分析",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];
    if app.is_loading() {
        spans.push(Span::styled(
            "  分析中…",
            Style::default().fg(Color::Yellow),
        ));
    }
    let title = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, area);
}

fn render_sentences(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .sentences
        .iter()
        .enumerate()
        .map(|(i, sentence)| {
            let content = format!("{}. {}", i + 1, sentence.trim());
            let style = if i == app.selected_index {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![Span::styled(content, style)]))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().title("句子").borders(Borders::ALL))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = ListState::default();
    if !app.sentences.is_empty() {
        state.select(Some(app.selected_index));
    }

    frame.render_stateful_widget(list, area, &mut state);
}

/// 原文/译文面板：上方为文本，下方为词表
fn render_panel(frame: &mut Frame, app: &App, panel: Panel, area: Rect) {
    let (label, text) = match (panel, app.result.as_ref()) {
        (Panel::Original, Some(r)) => ("原文", r.original_text.as_str()),
        (Panel::Translated, Some(r)) => ("译文", r.translated_text.as_str()),
        (Panel::Original, None) => ("原文", ""),
        (Panel::Translated, None) => ("译文", ""),
    };
    let analysis = app.analysis(panel);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(3)])
        .split(area);

    let body = if app.result.is_some() {
        text.to_string()
    } else if app.is_loading() {
        "加载中…".to_string()
    } else {
        "暂无结果，输入文本后按 [Enter] 提交".to_string()
    };
    let paragraph = Paragraph::new(body)
        .wrap(Wrap { trim: true })
        .block(Block::default().title(label).borders(Borders::ALL));
    frame.render_widget(paragraph, chunks[0]);

    let title = match analysis {
        Some(a) => format!(
            "{}词表 ({} 个单词, 共出现 {} 次)",
            label,
            a.words_count,
            a.total_occurrences()
        ),
        None => format!("{}词表", label),
    };
    render_word_table(
        frame,
        chunks[1],
        title,
        analysis,
        app.offset(panel),
        app.focus == panel && app.mode != AppMode::Editing,
    );
}

fn render_tree(frame: &mut Frame, app: &App, area: Rect) {
    let content = if app.is_tree_loading() {
        "语法树生成中…".to_string()
    } else if let Some(tree) = &app.tree {
        let dims = tree
            .dimensions()
            .map(|(w, h)| format!("{}x{}", w, h))
            .unwrap_or_else(|| "未知尺寸".to_string());
        format!(
            "句子: {}\n图片: {}\n{}  {} 字节",
            tree.sentence().trim(),
            tree.url(),
            dims,
            tree.size()
        )
    } else {
        "选中句子后按 [t] 生成语法树".to_string()
    };

    let paragraph = Paragraph::new(content)
        .wrap(Wrap { trim: false })
        .block(Block::default().title("语法树").borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = match app.mode {
        AppMode::Normal => {
            "[Enter] 提交  [i] 编辑  [j/k] 选句  [t] 语法树  [d] 导出  [Tab] 切换词表  [?] 帮助  [q] 退出"
        }
        AppMode::Editing => "[Esc] 完成输入  [Ctrl+S] 提交  [Ctrl+U] 清空",
        AppMode::Help => "[Esc] 关闭",
    };

    let message = app.message.as_deref().unwrap_or("");
    let text = if message.is_empty() {
        help_text.to_string()
    } else {
        format!("{}  |  {}", help_text, message)
    };

    let help = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(help, area);
}

fn render_help_dialog(frame: &mut Frame) {
    let area = centered_rect(60, 60, frame.area());
    let inner = render_dialog_framework(frame, area, "帮助");

    let lines = [
        "i / e        编辑输入文本",
        "Esc          结束编辑",
        "Ctrl+S       在编辑时直接提交",
        "Enter / s    提交文本进行翻译分析",
        "j / k        选择句子",
        "t            为选中的句子生成语法树",
        "d            导出 translation_results.txt",
        "Tab          切换原文/译文词表",
        "J / K        滚动词表",
        "c            清空输入",
        "q            退出",
    ];
    let text: Vec<Line> = lines.iter().map(|l| Line::from(*l)).collect();
    frame.render_widget(Paragraph::new(text), inner);
}

//! 通用 UI 组件
//!
//! 对话框、输入框、词表等通用组件

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table, Wrap},
};

use crate::models::TextAnalysis;

/// [组件] 弹窗基础框架
pub fn render_dialog_framework(frame: &mut Frame, area: Rect, title: &str) -> Rect {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// [组件] 带有标题和样式的输入框
pub fn render_input_widget(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    value: &str,
    is_focused: bool,
    active_color: Color,
) {
    let style = if is_focused {
        Style::default()
            .fg(active_color)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    // 聚焦时在末尾显示光标
    let shown = if is_focused {
        format!("{}▏", value)
    } else {
        value.to_string()
    };

    let input = Paragraph::new(shown)
        .style(style)
        .wrap(Wrap { trim: false })
        .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(input, area);
}

/// [组件] 词频表，从 offset 行开始显示
pub fn render_word_table(
    frame: &mut Frame,
    area: Rect,
    title: String,
    analysis: Option<&TextAnalysis>,
    offset: usize,
    is_focused: bool,
) {
    let border_style = if is_focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    let rows: Vec<Row> = analysis
        .map(|a| {
            a.words_info
                .iter()
                .skip(offset)
                .map(|info| {
                    Row::new(vec![
                        info.word.clone(),
                        info.frequency.to_string(),
                        info.grammatical_info.clone(),
                    ])
                })
                .collect()
        })
        .unwrap_or_default();

    let header = Row::new(vec!["单词", "频次", "语法信息"]).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(30),
            Constraint::Length(6),
            Constraint::Min(10),
        ],
    )
    .header(header)
    .block(block);

    frame.render_widget(table, area);
}

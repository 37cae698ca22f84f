use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Focus, Model, ToastLevel, Zoom};
use crate::stats::document_stats;

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let name = model.source_name.as_deref().unwrap_or("untitled");
    let dirty = if model.buffer.is_dirty() { " [modified]" } else { "" };

    let stats = document_stats(&model.buffer.text());
    let cursor = model.buffer.cursor();

    let zoom_indicator = match model.zoom {
        Zoom::Split => String::new(),
        Zoom::Editor => " [zoom editor]".to_string(),
        Zoom::Preview => " [zoom preview]".to_string(),
    };
    let focus = match model.focus {
        Focus::Editor => "editor",
        Focus::Preview => "preview",
    };

    let status = format!(
        " {name}{dirty}  {} words  {} chars  {} lines  Ln {}, Col {}  [{}%]{zoom_indicator}  [{focus}]  F1:help",
        stats.words,
        stats.characters,
        stats.lines,
        cursor.line + 1,
        cursor.col + 1,
        model.split_percent,
    );

    let status_bar =
        Paragraph::new(status).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}

pub fn render_prompt_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some(input) = model.open_prompt.as_deref() else {
        return;
    };
    let text = format!("open: {input}█  Enter: load  Esc: cancel");
    let bar = Paragraph::new(text).style(Style::default().bg(Color::Blue).fg(Color::White));
    frame.render_widget(bar, area);
}

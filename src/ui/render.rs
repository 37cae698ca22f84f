use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph};

use crate::app::{DragState, Focus, Model, Zoom};

use super::{overlays, split_panes, status};

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();

    let toast_active = model.active_toast().is_some();
    let prompt_active = model.open_prompt.is_some();
    // Same count the model uses for pane geometry, so scrolling and the
    // cursor never land under the bars.
    let footer_rows = model.footer_rows();
    let main_area = Rect {
        height: area.height.saturating_sub(footer_rows),
        ..area
    };
    let status_area = Rect {
        y: area.y + area.height.saturating_sub(1),
        height: 1,
        ..area
    };
    let prompt_area = Rect {
        y: area.y + area.height.saturating_sub(1 + u16::from(prompt_active)),
        height: 1,
        ..area
    };
    let toast_area = Rect {
        y: area.y
            + area
                .height
                .saturating_sub(1 + u16::from(prompt_active) + u16::from(toast_active)),
        height: 1,
        ..area
    };

    match model.zoom {
        Zoom::Split => {
            let (editor, divider, preview) = split_panes(main_area, model.split_percent);
            render_editor(model, frame, editor);
            render_divider(model, frame, divider);
            render_preview(model, frame, preview);
        }
        Zoom::Editor => render_editor(model, frame, main_area),
        Zoom::Preview => render_preview(model, frame, main_area),
    }

    if toast_active {
        status::render_toast_bar(model, frame, toast_area);
    }
    if prompt_active {
        status::render_prompt_bar(model, frame, prompt_area);
    }
    status::render_status_bar(model, frame, status_area);

    if model.help_visible {
        overlays::render_help_overlay(frame, area);
    } else if let Some(menu) = model.menu {
        overlays::render_menu_overlay(menu, frame, area);
    }
}

fn render_editor(model: &Model, frame: &mut Frame, area: Rect) {
    let buf = &model.buffer;
    let total_lines = buf.line_count();
    let gutter_width = line_number_width(total_lines);
    let cursor = buf.cursor();
    let show_cursor = model.focus == Focus::Editor && !model.modal_active();

    let start = model.editor_scroll;
    let end = (start + area.height as usize).min(total_lines);

    let mut content: Vec<Line> = Vec::new();
    for line_idx in start..end {
        let line_text = buf.line_at(line_idx).unwrap_or_default();
        let line_num = format!("{:>width$} ", line_idx + 1, width = gutter_width as usize);

        let mut spans = vec![Span::styled(line_num, Style::default().fg(Color::DarkGray))];

        if show_cursor && line_idx == cursor.line {
            let chars: Vec<char> = line_text.chars().collect();
            let col = cursor.col.min(chars.len());
            let before: String = chars[..col].iter().collect();
            let at: String = chars
                .get(col)
                .map_or_else(|| " ".to_string(), |ch| ch.to_string());
            let after: String = chars.iter().skip(col + 1).collect();

            if !before.is_empty() {
                spans.push(Span::raw(before));
            }
            spans.push(Span::styled(
                at,
                Style::default().bg(Color::White).fg(Color::Black),
            ));
            if !after.is_empty() {
                spans.push(Span::raw(after));
            }
        } else {
            spans.push(Span::raw(line_text));
        }

        content.push(Line::from(spans));
    }

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(content), area);
}

fn render_preview(model: &Model, frame: &mut Frame, area: Rect) {
    let visible = model
        .preview
        .visible_lines(model.preview_scroll, area.height as usize);

    let mut content: Vec<Line> = Vec::new();
    for line in visible {
        let line_style = super::style::style_for_line_type(line.line_type());
        let spans = line.spans().map_or_else(
            || vec![Span::styled(format!(" {}", line.content()), line_style)],
            |spans| {
                let mut out = vec![Span::raw(" ")];
                out.extend(spans.iter().map(|span| {
                    Span::styled(
                        span.text().to_string(),
                        super::style::style_for_inline(line_style, span.style()),
                    )
                }));
                out
            },
        );
        content.push(Line::from(spans));
    }

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(content), area);
}

fn render_divider(model: &Model, frame: &mut Frame, area: Rect) {
    if area.width == 0 {
        return;
    }
    let style = if model.divider_drag == DragState::Resizing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let rows: Vec<Line> = (0..area.height).map(|_| Line::styled("│", style)).collect();
    frame.render_widget(Paragraph::new(rows), area);
}

/// Calculate the width needed for line numbers.
pub const fn line_number_width(total_lines: usize) -> u16 {
    if total_lines < 10 {
        1
    } else if total_lines < 100 {
        2
    } else if total_lines < 1_000 {
        3
    } else if total_lines < 10_000 {
        4
    } else {
        5
    }
}

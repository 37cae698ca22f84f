use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::Menu;
use crate::export::ExportFormat;
use crate::templates::Template;

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

pub fn render_menu_overlay(menu: Menu, frame: &mut Frame, area: Rect) {
    let (title, items): (&str, Vec<String>) = match menu {
        Menu::Templates => (
            "Load Template",
            Template::ALL
                .iter()
                .enumerate()
                .map(|(i, t)| format!("{}: {}", i + 1, t.name()))
                .collect(),
        ),
        Menu::Exports => (
            "Export As",
            ExportFormat::ALL
                .iter()
                .enumerate()
                .map(|(i, f)| format!("{}: {}", i + 1, f.label()))
                .collect(),
        ),
    };

    let number_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();
    for item in &items {
        let (number, rest) = item.split_at(2);
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(number.to_string(), number_style),
            Span::raw(rest.to_string()),
        ]));
    }
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        "  Esc cancels",
        Style::default().fg(Color::Indexed(245)),
    ));

    // Longest label plus border, padding and the number prefix
    let width = items
        .iter()
        .map(|s| s.chars().count())
        .max()
        .unwrap_or(20)
        .max(title.len());
    #[allow(clippy::cast_possible_truncation)]
    let popup_width = (width as u16 + 10).min(area.width);
    #[allow(clippy::cast_possible_truncation)]
    let popup_height = (lines.len() as u16 + 4).min(area.height);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

pub fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(12).clamp(40, 60);
    let popup_height = area.height.saturating_sub(4).min(26);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::styled("Document", section_style));
    lines.push(Line::raw("  Ctrl+N              New empty document"));
    lines.push(Line::raw("  Ctrl+O              Open a markdown file"));
    lines.push(Line::raw("  Ctrl+T              Template menu"));
    lines.push(Line::raw("  Ctrl+E              Export menu"));
    lines.push(Line::raw("  paste a file path   Import (.md/.markdown)"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Panes", section_style));
    lines.push(Line::raw("  Tab                 Switch focus"));
    lines.push(Line::raw("  Ctrl+F              Zoom focused pane"));
    lines.push(Line::raw("  mouse drag divider  Resize panes (20-80%)"));
    lines.push(Line::raw("  wheel               Scroll pane under pointer"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Editing", section_style));
    lines.push(Line::raw("  arrows, Home/End    Move cursor"));
    lines.push(Line::raw("  Ctrl+Left/Right     Word left / right"));
    lines.push(Line::raw("  Ctrl+Home/End       Document start / end"));
    lines.push(Line::raw("  click               Place cursor"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Other", section_style));
    lines.push(Line::raw("  F1                  Toggle this help"));
    lines.push(Line::raw("  Ctrl+Q              Quit"));

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

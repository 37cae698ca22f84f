use std::path::PathBuf;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use crate::app::{App, Focus, Menu, Message, Model, Zoom};
use crate::editor::Direction;
use crate::export::ExportFormat;
use crate::templates::Template;

use super::event_loop::ResizeDebouncer;

const WHEEL_LINES: usize = 3;

impl App {
    pub(super) fn handle_event(
        event: &Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) => handle_key(*key, model),
            Event::Mouse(mouse) => handle_mouse(*mouse, model),
            Event::Paste(text) => Some(handle_paste(text)),
            Event::Resize(width, height) => {
                resize_debouncer.queue(*width, *height, now_ms);
                None
            }
            _ => None,
        }
    }
}

fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
    if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
        return None;
    }

    // Overlays consume keys before anything else.
    if model.help_visible {
        return Some(Message::HideHelp);
    }
    if model.menu.is_some() {
        return handle_menu_key(key, model);
    }
    if model.open_prompt.is_some() {
        return handle_prompt_key(key);
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match (key.code, ctrl) {
        (KeyCode::Char('q' | 'c'), true) => Some(Message::Quit),
        (KeyCode::F(1), _) => Some(Message::ToggleHelp),
        (KeyCode::Char('o'), true) => Some(Message::StartOpenPrompt),
        (KeyCode::Char('t'), true) => Some(Message::OpenTemplateMenu),
        (KeyCode::Char('e'), true) => Some(Message::OpenExportMenu),
        (KeyCode::Char('n'), true) => Some(Message::NewDocument),
        (KeyCode::Char('f'), true) => Some(Message::ToggleZoom),
        (KeyCode::Tab, _) => Some(Message::SwitchFocus),
        _ => match model.focus {
            Focus::Editor => handle_editor_key(key, ctrl),
            Focus::Preview => handle_preview_key(key, model),
        },
    }
}

fn handle_menu_key(key: KeyEvent, model: &Model) -> Option<Message> {
    if key.code == KeyCode::Esc {
        return Some(Message::CloseMenu);
    }
    let KeyCode::Char(digit) = key.code else {
        return None;
    };
    match model.menu? {
        Menu::Templates => Template::from_digit(digit).map(Message::LoadTemplate),
        Menu::Exports => ExportFormat::from_digit(digit).map(Message::Export),
    }
}

fn handle_prompt_key(key: KeyEvent) -> Option<Message> {
    match key.code {
        KeyCode::Esc => Some(Message::PromptCancel),
        KeyCode::Enter => Some(Message::PromptSubmit),
        KeyCode::Backspace => Some(Message::PromptBackspace),
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Message::PromptInput(ch))
        }
        _ => None,
    }
}

fn handle_editor_key(key: KeyEvent, ctrl: bool) -> Option<Message> {
    match (key.code, ctrl) {
        (KeyCode::Char(ch), false) => Some(Message::InsertChar(ch)),
        (KeyCode::Enter, _) => Some(Message::InsertNewline),
        (KeyCode::Backspace, _) => Some(Message::DeleteBack),
        (KeyCode::Delete, _) => Some(Message::DeleteForward),
        (KeyCode::Left, true) => Some(Message::MoveWordLeft),
        (KeyCode::Right, true) => Some(Message::MoveWordRight),
        (KeyCode::Left, false) => Some(Message::MoveCursor(Direction::Left)),
        (KeyCode::Right, false) => Some(Message::MoveCursor(Direction::Right)),
        (KeyCode::Up, _) => Some(Message::MoveCursor(Direction::Up)),
        (KeyCode::Down, _) => Some(Message::MoveCursor(Direction::Down)),
        (KeyCode::Home, true) => Some(Message::MoveToStart),
        (KeyCode::End, true) => Some(Message::MoveToEnd),
        (KeyCode::Home, false) => Some(Message::MoveHome),
        (KeyCode::End, false) => Some(Message::MoveEnd),
        (KeyCode::PageUp, _) => Some(Message::EditorScrollUp(10)),
        (KeyCode::PageDown, _) => Some(Message::EditorScrollDown(10)),
        _ => None,
    }
}

fn handle_preview_key(key: KeyEvent, model: &Model) -> Option<Message> {
    let page = model.content_height().max(1);
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(Message::PreviewScrollUp(1)),
        KeyCode::Down | KeyCode::Char('j') => Some(Message::PreviewScrollDown(1)),
        KeyCode::PageUp => Some(Message::PreviewScrollUp(page)),
        KeyCode::PageDown | KeyCode::Char(' ') => Some(Message::PreviewScrollDown(page)),
        KeyCode::Home | KeyCode::Char('g') => Some(Message::PreviewScrollUp(usize::MAX / 2)),
        KeyCode::End | KeyCode::Char('G') => Some(Message::PreviewScrollDown(usize::MAX / 2)),
        _ => None,
    }
}

fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
    if model.modal_active() {
        return None;
    }

    let main_area = model.main_area();
    let (editor_area, divider_area, _) = match model.zoom {
        Zoom::Split => crate::ui::split_panes(main_area, model.split_percent),
        Zoom::Editor => (main_area, Rect::default(), Rect::default()),
        Zoom::Preview => (Rect::default(), Rect::default(), main_area),
    };

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if model.zoom == Zoom::Split && on_divider(mouse.column, divider_area) {
                return Some(Message::DividerPress);
            }
            if point_in_rect(mouse.column, mouse.row, editor_area) {
                return Some(editor_click_message(model, editor_area, mouse));
            }
            None
        }
        MouseEventKind::Drag(MouseButton::Left) => Some(Message::DividerDrag(mouse.column)),
        MouseEventKind::Up(MouseButton::Left) => Some(Message::DividerRelease),
        MouseEventKind::ScrollUp => Some(scroll_message(model, editor_area, mouse, true)),
        MouseEventKind::ScrollDown => Some(scroll_message(model, editor_area, mouse, false)),
        _ => None,
    }
}

/// The divider is one column wide; accept a neighbor column as a hit so the
/// target is not too fiddly.
fn on_divider(column: u16, divider: Rect) -> bool {
    divider.width > 0 && column + 1 >= divider.x && column <= divider.x + 1
}

fn point_in_rect(column: u16, row: u16, rect: Rect) -> bool {
    column >= rect.x
        && column < rect.x + rect.width
        && row >= rect.y
        && row < rect.y + rect.height
}

fn editor_click_message(model: &Model, editor_area: Rect, mouse: MouseEvent) -> Message {
    let gutter = crate::ui::line_number_width(model.buffer.line_count()) + 1;
    let line = model.editor_scroll + usize::from(mouse.row.saturating_sub(editor_area.y));
    let col = usize::from(
        mouse
            .column
            .saturating_sub(editor_area.x)
            .saturating_sub(gutter),
    );
    Message::MoveTo(line, col)
}

fn scroll_message(model: &Model, editor_area: Rect, mouse: MouseEvent, up: bool) -> Message {
    let over_editor = model.zoom != Zoom::Preview
        && (model.zoom == Zoom::Editor || point_in_rect(mouse.column, mouse.row, editor_area));
    match (over_editor, up) {
        (true, true) => Message::EditorScrollUp(WHEEL_LINES),
        (true, false) => Message::EditorScrollDown(WHEEL_LINES),
        (false, true) => Message::PreviewScrollUp(WHEEL_LINES),
        (false, false) => Message::PreviewScrollDown(WHEEL_LINES),
    }
}

/// A paste whose every non-empty line names an existing file is treated as a
/// drag-and-drop; anything else is text input for the editor.
fn handle_paste(text: &str) -> Message {
    let candidates: Vec<PathBuf> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| PathBuf::from(line.trim_matches('\'').trim_matches('"')))
        .collect();

    let all_files = !candidates.is_empty() && candidates.iter().all(|path| path.is_file());
    if all_files {
        return Message::RequestOpen(candidates);
    }
    Message::InsertText(text.to_string())
}

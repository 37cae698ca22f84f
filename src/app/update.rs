use std::path::PathBuf;

use crate::app::Model;
use crate::app::model::{DragState, Focus, Menu, ToastLevel, Zoom};
use crate::editor::Direction;
use crate::export::ExportFormat;
use crate::templates::Template;

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Editing
    /// Insert a character at the cursor
    InsertChar(char),
    /// Split the line at the cursor (Enter)
    InsertNewline,
    /// Insert a block of text at the cursor (paste)
    InsertText(String),
    /// Delete the character before the cursor (Backspace)
    DeleteBack,
    /// Delete the character at the cursor (Delete)
    DeleteForward,
    /// Move the cursor in a direction
    MoveCursor(Direction),
    /// Move to beginning of line (Home)
    MoveHome,
    /// Move to end of line (End)
    MoveEnd,
    /// Move one word left (Ctrl+Left)
    MoveWordLeft,
    /// Move one word right (Ctrl+Right)
    MoveWordRight,
    /// Move to start of document (Ctrl+Home)
    MoveToStart,
    /// Move to end of document (Ctrl+End)
    MoveToEnd,
    /// Move to absolute position (line, col), e.g. from a mouse click
    MoveTo(usize, usize),

    // Document
    /// Replace the document with an empty one
    NewDocument,
    /// Replace the document with a template
    LoadTemplate(Template),
    /// A background file read finished
    FileLoaded { name: String, text: String },
    /// A background file read failed
    FileReadFailed { name: String, error: String },
    /// Ask to load markdown files (from a drop or the open prompt)
    RequestOpen(Vec<PathBuf>),

    // Menus and overlays
    OpenTemplateMenu,
    OpenExportMenu,
    CloseMenu,
    /// Run an export in the chosen format
    Export(ExportFormat),
    /// Open the file-path prompt
    StartOpenPrompt,
    /// Append a character to the prompt
    PromptInput(char),
    /// Delete the last prompt character
    PromptBackspace,
    /// Submit the prompt text as a path
    PromptSubmit,
    /// Close the prompt without loading
    PromptCancel,
    /// Toggle the help overlay
    ToggleHelp,
    /// Hide the help overlay
    HideHelp,

    // Layout
    /// Mouse pressed on the divider
    DividerPress,
    /// Mouse dragged to a column while resizing
    DividerDrag(u16),
    /// Mouse released after resizing
    DividerRelease,
    /// Zoom the focused pane, or restore the split
    ToggleZoom,
    /// Switch focus between editor and preview
    SwitchFocus,
    /// Terminal resized
    Resize(u16, u16),

    // Scrolling
    PreviewScrollUp(usize),
    PreviewScrollDown(usize),
    EditorScrollUp(usize),
    EditorScrollDown(usize),

    // Application
    Quit,
}

/// Pure state transition: apply a message to the model.
///
/// Side effects (file reads, exports) are dispatched separately by the
/// event loop; this function only changes state.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        // Editing
        Message::InsertChar(ch) => {
            model.buffer.insert_char(ch);
            edited(&mut model);
        }
        Message::InsertNewline => {
            model.buffer.split_line();
            edited(&mut model);
        }
        Message::InsertText(text) => {
            // While the open prompt is up, pasted text belongs to it.
            if let Some(prompt) = &mut model.open_prompt {
                prompt.push_str(text.trim());
            } else {
                model.buffer.insert_str(&text);
                edited(&mut model);
            }
        }
        Message::DeleteBack => {
            if model.buffer.delete_back() {
                edited(&mut model);
            }
        }
        Message::DeleteForward => {
            if model.buffer.delete_forward() {
                edited(&mut model);
            }
        }
        Message::MoveCursor(direction) => {
            model.buffer.move_cursor(direction);
            model.follow_cursor();
        }
        Message::MoveHome => model.buffer.move_home(),
        Message::MoveEnd => model.buffer.move_end(),
        Message::MoveWordLeft => {
            model.buffer.move_word_left();
            model.follow_cursor();
        }
        Message::MoveWordRight => {
            model.buffer.move_word_right();
            model.follow_cursor();
        }
        Message::MoveToStart => {
            model.buffer.move_to_start();
            model.follow_cursor();
        }
        Message::MoveToEnd => {
            model.buffer.move_to_end();
            model.follow_cursor();
        }
        Message::MoveTo(line, col) => {
            model.buffer.move_to(line, col);
            model.follow_cursor();
        }

        // Document
        Message::NewDocument => {
            model.set_document(None, "");
            model.show_toast(ToastLevel::Info, "New document");
        }
        Message::LoadTemplate(template) => {
            model.set_document(None, template.content());
            model.menu = None;
            model.show_toast(ToastLevel::Info, format!("Loaded template: {}", template.name()));
        }
        Message::FileLoaded { name, text } => {
            model.set_document(Some(name.clone()), &text);
            model.show_toast(ToastLevel::Info, format!("Opened {name}"));
        }
        Message::FileReadFailed { name, error } => {
            model.show_toast(ToastLevel::Error, format!("Could not open {name}: {error}"));
        }
        // Dispatched as a side effect; the prompt closes here.
        Message::RequestOpen(_) => {
            model.open_prompt = None;
        }

        // Menus and overlays
        Message::OpenTemplateMenu => {
            model.menu = Some(Menu::Templates);
            model.help_visible = false;
        }
        Message::OpenExportMenu => {
            model.menu = Some(Menu::Exports);
            model.help_visible = false;
        }
        Message::CloseMenu => model.menu = None,
        // The export itself runs as a side effect.
        Message::Export(_) => model.menu = None,
        Message::StartOpenPrompt => {
            model.open_prompt = Some(String::new());
            model.menu = None;
            model.help_visible = false;
        }
        Message::PromptInput(ch) => {
            if let Some(prompt) = &mut model.open_prompt {
                prompt.push(ch);
            }
        }
        Message::PromptBackspace => {
            if let Some(prompt) = &mut model.open_prompt {
                prompt.pop();
            }
        }
        Message::PromptSubmit => {
            // Handled as a side effect; state is untouched so the effect
            // can still read the prompt text.
        }
        Message::PromptCancel => model.open_prompt = None,
        Message::ToggleHelp => model.help_visible = !model.help_visible,
        Message::HideHelp => model.help_visible = false,

        // Layout
        Message::DividerPress => {
            if model.zoom == Zoom::Split {
                model.divider_drag = DragState::Resizing;
            }
        }
        Message::DividerDrag(column) => {
            // Drags that did not start on the divider never resize.
            if model.divider_drag == DragState::Resizing {
                let percent = crate::ui::split_percent_for_column(model.main_area(), column);
                if percent != model.split_percent {
                    model.split_percent = percent;
                    model.refresh_preview();
                }
            }
        }
        Message::DividerRelease => model.divider_drag = DragState::Idle,
        Message::ToggleZoom => {
            model.zoom = match model.zoom {
                Zoom::Split => match model.focus {
                    Focus::Editor => Zoom::Editor,
                    Focus::Preview => Zoom::Preview,
                },
                Zoom::Editor | Zoom::Preview => Zoom::Split,
            };
            model.divider_drag = DragState::Idle;
            model.refresh_preview();
        }
        Message::SwitchFocus => {
            model.focus = match model.focus {
                Focus::Editor => Focus::Preview,
                Focus::Preview => Focus::Editor,
            };
            // Zoom follows focus so the visible pane stays the focused one.
            if model.zoom != Zoom::Split {
                model.zoom = match model.focus {
                    Focus::Editor => Zoom::Editor,
                    Focus::Preview => Zoom::Preview,
                };
                model.refresh_preview();
            }
        }
        Message::Resize(width, height) => {
            model.frame_size = (width, height);
            model.refresh_preview();
            model.follow_cursor();
            model.editor_scroll = model
                .editor_scroll
                .min(model.buffer.line_count().saturating_sub(1));
        }

        // Scrolling
        Message::PreviewScrollUp(n) => {
            model.preview_scroll = model.preview_scroll.saturating_sub(n);
        }
        Message::PreviewScrollDown(n) => {
            let max = model.preview.max_scroll(model.content_height());
            model.preview_scroll = (model.preview_scroll + n).min(max);
        }
        Message::EditorScrollUp(n) => {
            model.editor_scroll = model.editor_scroll.saturating_sub(n);
        }
        Message::EditorScrollDown(n) => {
            let max = model.buffer.line_count().saturating_sub(1);
            model.editor_scroll = (model.editor_scroll + n).min(max);
        }

        // Application
        Message::Quit => model.should_quit = true,
    }

    model
}

/// Common follow-up after any buffer mutation.
fn edited(model: &mut Model) {
    model.refresh_preview();
    model.follow_cursor();
}

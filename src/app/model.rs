use std::time::{Duration, Instant};

use ratatui::layout::Rect;

use crate::editor::EditorBuffer;
use crate::preview::PreviewDoc;
use crate::ui::{DEFAULT_SPLIT_PERCENT, PANE_PADDING, clamp_split, split_panes};

/// Severity of a transient notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// Which pane fills the frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Zoom {
    #[default]
    Split,
    Editor,
    Preview,
}

/// Which pane receives keyboard input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Editor,
    Preview,
}

/// State of the divider drag interaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Resizing,
}

/// Which overlay menu is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Menu {
    Templates,
    Exports,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
#[derive(Debug)]
pub struct Model {
    /// The markdown document being edited
    pub buffer: EditorBuffer,
    /// Display name of the loaded file, if any
    pub source_name: Option<String>,
    /// Rendered preview of the current document
    pub preview: PreviewDoc,
    /// First visible editor line
    pub editor_scroll: usize,
    /// First visible preview line
    pub preview_scroll: usize,
    /// Editor pane width as a percentage of the frame
    pub split_percent: u16,
    /// Divider drag state machine
    pub divider_drag: DragState,
    /// Pane zoom (fullscreen) state
    pub zoom: Zoom,
    /// Focused pane
    pub focus: Focus,
    /// Terminal size, mirrored from resize events
    pub frame_size: (u16, u16),
    /// Open overlay menu, if any
    pub menu: Option<Menu>,
    /// Text of the open-file prompt while it is active
    pub open_prompt: Option<String>,
    /// Whether the help overlay is visible
    pub help_visible: bool,
    toast: Option<Toast>,
    /// Whether the app should quit
    pub should_quit: bool,
}

impl Model {
    pub fn new(terminal_size: (u16, u16), split_percent: u16) -> Self {
        let mut model = Self {
            buffer: EditorBuffer::empty(),
            source_name: None,
            preview: PreviewDoc::empty(),
            editor_scroll: 0,
            preview_scroll: 0,
            split_percent: clamp_split(split_percent),
            divider_drag: DragState::Idle,
            zoom: Zoom::Split,
            focus: Focus::Editor,
            frame_size: terminal_size,
            menu: None,
            open_prompt: None,
            help_visible: false,
            toast: None,
            should_quit: false,
        };
        model.refresh_preview();
        model
    }

    /// Replace the whole document and re-render the preview.
    ///
    /// Used by file loads, templates and New. Scroll positions and the
    /// cursor return to the top.
    pub fn set_document(&mut self, name: Option<String>, text: &str) {
        self.buffer.replace(text);
        self.source_name = name;
        self.editor_scroll = 0;
        self.preview_scroll = 0;
        self.refresh_preview();
    }

    /// Re-render the preview from the buffer at the current pane width.
    pub fn refresh_preview(&mut self) {
        self.preview = crate::preview::render(&self.buffer.text(), self.preview_width());
        self.preview_scroll = self
            .preview_scroll
            .min(self.preview.max_scroll(self.content_height()));
    }

    /// Rows taken by the status bar and any active toast or prompt bar.
    pub fn footer_rows(&self) -> u16 {
        1 + u16::from(self.active_toast().is_some()) + u16::from(self.open_prompt.is_some())
    }

    /// The frame minus the footer bars.
    pub fn main_area(&self) -> Rect {
        Rect::new(
            0,
            0,
            self.frame_size.0,
            self.frame_size.1.saturating_sub(self.footer_rows()),
        )
    }

    /// Rows available for pane content.
    pub fn content_height(&self) -> usize {
        usize::from(self.main_area().height)
    }

    /// Width the preview wraps to, given the current zoom and split.
    pub fn preview_width(&self) -> u16 {
        let width = match self.zoom {
            Zoom::Split => split_panes(self.main_area(), self.split_percent).2.width,
            Zoom::Editor | Zoom::Preview => self.main_area().width,
        };
        width.saturating_sub(PANE_PADDING).max(1)
    }

    /// Keep the cursor line inside the visible editor rows.
    pub fn follow_cursor(&mut self) {
        let height = self.content_height().max(1);
        let line = self.buffer.cursor().line;
        if line < self.editor_scroll {
            self.editor_scroll = line;
        } else if line >= self.editor_scroll + height {
            self.editor_scroll = line + 1 - height;
        }
    }

    pub fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }

    /// Whether an overlay is consuming keyboard input.
    pub const fn modal_active(&self) -> bool {
        self.help_visible || self.menu.is_some() || self.open_prompt.is_some()
    }
}

// Implement Default for Model to allow std::mem::take
impl Default for Model {
    fn default() -> Self {
        Self::new((80, 24), DEFAULT_SPLIT_PERCENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_model_clamps_split() {
        assert_eq!(Model::new((80, 24), 5).split_percent, 20);
        assert_eq!(Model::new((80, 24), 95).split_percent, 80);
        assert_eq!(Model::new((80, 24), 50).split_percent, 50);
    }

    #[test]
    fn test_set_document_resets_position() {
        let mut model = Model::new((80, 24), 50);
        model.editor_scroll = 7;
        model.preview_scroll = 3;
        model.set_document(Some("notes.md".into()), "# hi");
        assert_eq!(model.editor_scroll, 0);
        assert_eq!(model.preview_scroll, 0);
        assert_eq!(model.buffer.text(), "# hi");
        assert!(model.preview.line_count() > 0);
    }

    #[test]
    fn test_follow_cursor_scrolls_down_and_up() {
        let text = "x\n".repeat(100);
        let mut model = Model::new((80, 11), 50);
        model.set_document(None, &text);

        model.buffer.move_to(50, 0);
        model.follow_cursor();
        assert_eq!(model.editor_scroll, 41);

        model.buffer.move_to(10, 0);
        model.follow_cursor();
        assert_eq!(model.editor_scroll, 10);
    }

    #[test]
    fn test_content_height_shrinks_with_footer_bars() {
        let mut model = Model::new((80, 24), 50);
        assert_eq!(model.content_height(), 23);

        model.show_toast(ToastLevel::Info, "saved");
        assert_eq!(model.content_height(), 22);

        model.open_prompt = Some(String::new());
        assert_eq!(model.content_height(), 21);

        assert!(model.expire_toast(Instant::now() + Duration::from_secs(5)));
        model.open_prompt = None;
        assert_eq!(model.content_height(), 23);
    }

    #[test]
    fn test_follow_cursor_stays_above_toast_bar() {
        let text = "x\n".repeat(100);
        let mut model = Model::new((80, 12), 50);
        model.set_document(None, &text);
        model.show_toast(ToastLevel::Info, "opened");

        model.buffer.move_to(50, 0);
        model.follow_cursor();
        // 10 content rows remain under status and toast bars.
        assert_eq!(model.editor_scroll, 41);
    }

    #[test]
    fn test_toast_expiry() {
        let mut model = Model::new((80, 24), 50);
        model.show_toast(ToastLevel::Info, "hello");
        assert!(model.active_toast().is_some());

        assert!(!model.expire_toast(Instant::now()));
        assert!(model.expire_toast(Instant::now() + Duration::from_secs(5)));
        assert!(model.active_toast().is_none());
    }

    #[test]
    fn test_preview_width_tracks_zoom() {
        let mut model = Model::new((100, 24), 50);
        let split_width = model.preview_width();
        model.zoom = Zoom::Preview;
        assert!(model.preview_width() > split_width);
    }
}

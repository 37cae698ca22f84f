// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. export::ExportFormat)
    clippy::module_name_repetitions
)]

//! # Markpane
//!
//! A split-pane terminal markdown editor with live preview and export.
//!
//! The left pane is a plain-text markdown editor; the right pane shows a
//! live-rendered preview with syntax-highlighted code blocks. The divider
//! between them is mouse-draggable. Documents can be seeded from a file,
//! a terminal drag-and-drop, or one of three built-in templates, and
//! exported to Markdown, HTML, PDF (via the system browser's print
//! dialog) and DOCX (via pandoc).
//!
//! ## Architecture
//!
//! Markpane uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`editor`]: The document text buffer
//! - [`preview`]: Markdown rendering for the preview pane
//! - [`export`]: Export to md/html/pdf/docx
//! - [`ingest`]: File acceptance and asynchronous reading
//! - [`templates`]: Built-in sample documents
//! - [`highlight`]: Syntax highlighting
//! - [`stats`]: Word/character/line statistics
//! - [`ui`]: Terminal UI components

pub mod app;
pub mod config;
pub mod editor;
pub mod export;
pub mod highlight;
pub mod ingest;
pub mod preview;
pub mod stats;
pub mod templates;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::editor::EditorBuffer;
    pub use crate::export::ExportFormat;
    pub use crate::preview::PreviewDoc;
}

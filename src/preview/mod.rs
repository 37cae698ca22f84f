//! Markdown rendering for the preview pane.
//!
//! The preview is a pure function of the document text and the pane width:
//! [`render`] parses the markdown with comrak and flattens it into styled,
//! wrapped [`RenderedLine`]s. Fenced code blocks are syntax highlighted at
//! render time.

mod parser;
mod types;

pub(crate) use parser::markdown_options;
pub use parser::render;
pub use types::{InlineColor, InlineSpan, InlineStyle, LineType, PreviewDoc, RenderedLine};

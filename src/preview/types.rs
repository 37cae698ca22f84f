//! Preview line types.

/// The rendered preview of a markdown document.
///
/// A flat list of styled lines, produced by [`crate::preview::render`] and
/// consumed by the preview pane. Rebuilt from scratch on every document or
/// layout change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewDoc {
    lines: Vec<RenderedLine>,
}

impl PreviewDoc {
    /// An empty preview (shown before any text exists).
    pub const fn empty() -> Self {
        Self { lines: Vec::new() }
    }

    pub(crate) fn from_lines(lines: Vec<RenderedLine>) -> Self {
        Self { lines }
    }

    /// Total number of rendered lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Lines from `offset`, at most `count` of them.
    pub fn visible_lines(&self, offset: usize, count: usize) -> &[RenderedLine] {
        let start = offset.min(self.lines.len());
        let end = (start + count).min(self.lines.len());
        &self.lines[start..end]
    }

    /// Largest scroll offset that still shows a full page where possible.
    pub fn max_scroll(&self, viewport_height: usize) -> usize {
        self.lines.len().saturating_sub(viewport_height)
    }
}

/// A single preview line with styling information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    content: String,
    line_type: LineType,
    spans: Vec<InlineSpan>,
}

impl RenderedLine {
    pub const fn new(content: String, line_type: LineType) -> Self {
        Self {
            content,
            line_type,
            spans: Vec::new(),
        }
    }

    pub const fn with_spans(content: String, line_type: LineType, spans: Vec<InlineSpan>) -> Self {
        Self {
            content,
            line_type,
            spans,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub const fn line_type(&self) -> LineType {
        self.line_type
    }

    /// Inline spans, when the line carries more than one style.
    pub fn spans(&self) -> Option<&[InlineSpan]> {
        if self.spans.is_empty() {
            None
        } else {
            Some(&self.spans)
        }
    }
}

/// Type of a preview line, used for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineType {
    Paragraph,
    /// Heading with level (1-6)
    Heading(u8),
    CodeBlock,
    BlockQuote,
    /// List item with nesting depth
    ListItem(usize),
    Table,
    HorizontalRule,
    /// Placeholder for an image reference
    Image,
    Empty,
}

/// Inline style flags for a text span.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InlineStyle {
    pub emphasis: bool,
    pub strong: bool,
    pub code: bool,
    pub strikethrough: bool,
    pub link: bool,
    pub fg: Option<InlineColor>,
}

impl InlineStyle {
    /// Style with only the code flag set.
    pub const fn code() -> Self {
        Self {
            emphasis: false,
            strong: false,
            code: true,
            strikethrough: false,
            link: false,
            fg: None,
        }
    }
}

/// RGB color for inline styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InlineColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// A styled inline span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineSpan {
    text: String,
    style: InlineStyle,
}

impl InlineSpan {
    pub const fn new(text: String, style: InlineStyle) -> Self {
        Self { text, style }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn style(&self) -> InlineStyle {
        self.style
    }
}

pub(crate) fn spans_to_string(spans: &[InlineSpan]) -> String {
    spans.iter().map(InlineSpan::text).collect()
}

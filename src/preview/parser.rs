//! Markdown parsing with comrak.

use comrak::nodes::{AstNode, ListType, NodeValue, TableAlignment};
use comrak::{Arena, Options, parse_document};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::types::{InlineSpan, InlineStyle, LineType, PreviewDoc, RenderedLine, spans_to_string};
use crate::highlight::highlight_code;

/// GFM options shared by the preview and the HTML exporter.
pub(crate) fn markdown_options() -> Options {
    let mut options = Options::default();
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options
}

/// Render markdown source into preview lines wrapped to `width` columns.
///
/// # Example
///
/// ```
/// use markpane::preview;
///
/// let doc = preview::render("# Hello\n\nWorld", 80);
/// assert!(doc.line_count() >= 3);
/// ```
pub fn render(source: &str, width: u16) -> PreviewDoc {
    let arena = Arena::new();
    let options = markdown_options();
    let root = parse_document(&arena, source, &options);

    let wrap_width = usize::from(width.max(1));
    let mut lines = Vec::new();
    walk(root, &mut lines, wrap_width, 0, None);

    // Drop the trailing blank separator so short documents don't scroll.
    while lines
        .last()
        .is_some_and(|line| line.line_type() == LineType::Empty)
    {
        lines.pop();
    }

    PreviewDoc::from_lines(lines)
}

fn walk<'a>(
    node: &'a AstNode<'a>,
    lines: &mut Vec<RenderedLine>,
    wrap_width: usize,
    depth: usize,
    list_marker: Option<String>,
) {
    match &node.data.borrow().value {
        NodeValue::Document => {
            for child in node.children() {
                walk(child, lines, wrap_width, depth, None);
            }
        }

        NodeValue::Heading(heading) => {
            let text = extract_text(node);
            let prefix = "#".repeat(usize::from(heading.level));
            lines.push(RenderedLine::new(
                format!("{prefix} {text}"),
                LineType::Heading(heading.level),
            ));
            lines.push(RenderedLine::new(String::new(), LineType::Empty));
        }

        NodeValue::Paragraph => {
            if let Some((alt, src)) = sole_image(node) {
                let label = if alt.is_empty() { &src } else { &alt };
                lines.push(RenderedLine::new(
                    format!("[Image: {label}]"),
                    LineType::Image,
                ));
            } else {
                let spans = collect_inline_spans(node);
                push_wrapped(lines, &spans, wrap_width, "", "", LineType::Paragraph);
            }
            lines.push(RenderedLine::new(String::new(), LineType::Empty));
        }

        NodeValue::CodeBlock(code_block) => {
            let language = code_block
                .info
                .split_whitespace()
                .next()
                .filter(|s| !s.is_empty());
            for line_spans in highlight_code(language, &code_block.literal) {
                let content = spans_to_string(&line_spans);
                lines.push(RenderedLine::with_spans(
                    content,
                    LineType::CodeBlock,
                    line_spans,
                ));
            }
            lines.push(RenderedLine::new(String::new(), LineType::Empty));
        }

        NodeValue::List(list) => {
            let list_depth = depth + 1;
            let count = node.children().count();
            let number_width = (list.start + count.saturating_sub(1)).to_string().len();

            for (index, child) in node.children().enumerate() {
                let marker = match list.list_type {
                    ListType::Bullet => "• ".to_string(),
                    ListType::Ordered => {
                        format!("{:>number_width$}. ", list.start + index)
                    }
                };
                walk(child, lines, wrap_width, list_depth, Some(marker));
            }
            if depth == 0 {
                lines.push(RenderedLine::new(String::new(), LineType::Empty));
            }
        }

        NodeValue::Item(_) | NodeValue::TaskItem(_) => {
            let indent = "  ".repeat(depth.saturating_sub(1));
            let marker = match task_marker(node) {
                Some(mark) => format!("{mark} "),
                None => list_marker.unwrap_or_else(|| "• ".to_string()),
            };
            let first = format!("{indent}{marker}");
            let rest = format!("{indent}{}", " ".repeat(marker.chars().count()));
            let mut rendered_any = false;

            for child in node.children() {
                match &child.data.borrow().value {
                    NodeValue::Paragraph | NodeValue::TaskItem(_) => {
                        let spans = collect_inline_spans(child);
                        let prefix = if rendered_any { &rest } else { &first };
                        push_wrapped(
                            lines,
                            &spans,
                            wrap_width,
                            prefix,
                            &rest,
                            LineType::ListItem(depth),
                        );
                        rendered_any = true;
                    }
                    _ => walk(child, lines, wrap_width, depth, None),
                }
            }

            if !rendered_any {
                let spans = collect_inline_spans(node);
                push_wrapped(
                    lines,
                    &spans,
                    wrap_width,
                    &first,
                    &rest,
                    LineType::ListItem(depth),
                );
            }
        }

        NodeValue::BlockQuote => {
            render_blockquote(node, lines, wrap_width, 1);
            lines.push(RenderedLine::new(String::new(), LineType::Empty));
        }

        NodeValue::ThematicBreak => {
            let rule = "─".repeat(wrap_width.clamp(3, 40));
            lines.push(RenderedLine::new(rule, LineType::HorizontalRule));
            lines.push(RenderedLine::new(String::new(), LineType::Empty));
        }

        NodeValue::Table(_) => {
            for line in render_table(node, wrap_width) {
                lines.push(RenderedLine::new(line, LineType::Table));
            }
            lines.push(RenderedLine::new(String::new(), LineType::Empty));
        }

        NodeValue::Image(image) => {
            let alt = extract_text(node);
            let label = if alt.is_empty() { &image.url } else { &alt };
            lines.push(RenderedLine::new(
                format!("[Image: {label}]"),
                LineType::Image,
            ));
        }

        _ => {
            for child in node.children() {
                walk(child, lines, wrap_width, depth, list_marker.clone());
            }
        }
    }
}

fn push_wrapped(
    lines: &mut Vec<RenderedLine>,
    spans: &[InlineSpan],
    wrap_width: usize,
    prefix_first: &str,
    prefix_next: &str,
    line_type: LineType,
) {
    for line_spans in wrap_spans(spans, wrap_width, prefix_first, prefix_next) {
        let content = spans_to_string(&line_spans);
        lines.push(RenderedLine::with_spans(content, line_type, line_spans));
    }
}

fn render_blockquote<'a>(
    node: &'a AstNode<'a>,
    lines: &mut Vec<RenderedLine>,
    wrap_width: usize,
    quote_depth: usize,
) {
    let prefix = "│ ".repeat(quote_depth);

    for child in node.children() {
        match &child.data.borrow().value {
            NodeValue::Paragraph => {
                let spans = collect_inline_spans(child);
                push_wrapped(
                    lines,
                    &spans,
                    wrap_width,
                    &prefix,
                    &prefix,
                    LineType::BlockQuote,
                );
            }
            NodeValue::BlockQuote => {
                render_blockquote(child, lines, wrap_width, quote_depth + 1);
            }
            _ => {
                let text = extract_text(child);
                for raw_line in text.lines() {
                    let spans = vec![InlineSpan::new(
                        raw_line.to_string(),
                        InlineStyle::default(),
                    )];
                    push_wrapped(
                        lines,
                        &spans,
                        wrap_width,
                        &prefix,
                        &prefix,
                        LineType::BlockQuote,
                    );
                }
            }
        }
    }
}

fn render_table<'a>(table_node: &'a AstNode<'a>, wrap_width: usize) -> Vec<String> {
    let alignments = match &table_node.data.borrow().value {
        NodeValue::Table(table) => table.alignments.clone(),
        _ => Vec::new(),
    };

    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut has_header = false;
    for row_node in table_node.children() {
        let NodeValue::TableRow(is_header) = row_node.data.borrow().value else {
            continue;
        };
        has_header |= is_header;
        let cells = row_node
            .children()
            .map(|cell| {
                extract_text(cell)
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect();
        rows.push(cells);
    }

    let num_cols = rows.iter().map(Vec::len).max().unwrap_or(0);
    if num_cols == 0 {
        return Vec::new();
    }
    for row in &mut rows {
        row.resize(num_cols, String::new());
    }

    let mut col_widths = vec![1_usize; num_cols];
    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            col_widths[idx] = col_widths[idx].max(UnicodeWidthStr::width(cell.as_str()));
        }
    }

    // Shrink the widest column until the table fits the pane.
    let max_table_width = wrap_width.max(4);
    while 1 + col_widths.iter().sum::<usize>() + 3 * num_cols > max_table_width {
        let Some((widest, _)) = col_widths
            .iter()
            .enumerate()
            .max_by_key(|&(_, width)| *width)
        else {
            break;
        };
        if col_widths[widest] <= 1 {
            break;
        }
        col_widths[widest] -= 1;
    }

    let mut out = Vec::new();
    out.push(table_border(&col_widths, '┌', '┬', '┐'));
    for (idx, row) in rows.iter().enumerate() {
        out.push(table_row(row, &col_widths, &alignments));
        if has_header && idx == 0 {
            out.push(table_border(&col_widths, '├', '┼', '┤'));
        }
    }
    out.push(table_border(&col_widths, '└', '┴', '┘'));
    out
}

fn table_border(widths: &[usize], left: char, middle: char, right: char) -> String {
    let mut out = String::new();
    out.push(left);
    for (idx, width) in widths.iter().enumerate() {
        out.push_str(&"─".repeat(width + 2));
        if idx + 1 < widths.len() {
            out.push(middle);
        }
    }
    out.push(right);
    out
}

fn table_row(cells: &[String], widths: &[usize], alignments: &[TableAlignment]) -> String {
    let mut out = String::new();
    out.push('│');
    for (idx, width) in widths.iter().enumerate() {
        let content = truncate_to_width(cells.get(idx).map_or("", String::as_str), *width);
        let padding = width.saturating_sub(UnicodeWidthStr::width(content.as_str()));

        out.push(' ');
        match alignments.get(idx).copied().unwrap_or(TableAlignment::None) {
            TableAlignment::Right => {
                out.push_str(&" ".repeat(padding));
                out.push_str(&content);
            }
            TableAlignment::Center => {
                let left = padding / 2;
                out.push_str(&" ".repeat(left));
                out.push_str(&content);
                out.push_str(&" ".repeat(padding - left));
            }
            TableAlignment::Left | TableAlignment::None => {
                out.push_str(&content);
                out.push_str(&" ".repeat(padding));
            }
        }
        out.push_str(" │");
    }
    out
}

fn truncate_to_width(text: &str, max_width: usize) -> String {
    let mut out = String::new();
    let mut width = 0usize;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width {
            break;
        }
        out.push(ch);
        width += ch_width;
    }
    out
}

fn extract_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut text = String::new();
    extract_text_into(node, &mut text);
    text
}

fn extract_text_into<'a>(node: &'a AstNode<'a>, text: &mut String) {
    match &node.data.borrow().value {
        NodeValue::Text(t) => text.push_str(t),
        NodeValue::Code(code) => text.push_str(&code.literal),
        NodeValue::SoftBreak | NodeValue::LineBreak => text.push('\n'),
        _ => {
            for child in node.children() {
                extract_text_into(child, text);
            }
        }
    }
}

fn collect_inline_spans<'a>(node: &'a AstNode<'a>) -> Vec<InlineSpan> {
    let mut spans = Vec::new();
    collect_spans_into(node, InlineStyle::default(), &mut spans);
    spans
}

fn collect_spans_into<'a>(node: &'a AstNode<'a>, style: InlineStyle, spans: &mut Vec<InlineSpan>) {
    match &node.data.borrow().value {
        // Nested lists are block structure, handled by the caller.
        NodeValue::List(_) | NodeValue::Item(_) => {}
        NodeValue::Text(t) => spans.push(InlineSpan::new(t.clone(), style)),
        NodeValue::Code(code) => {
            let mut code_style = InlineStyle::code();
            code_style.link = style.link;
            spans.push(InlineSpan::new(code.literal.clone(), code_style));
        }
        NodeValue::Emph => {
            let mut next = style;
            next.emphasis = true;
            for child in node.children() {
                collect_spans_into(child, next, spans);
            }
        }
        NodeValue::Strong => {
            let mut next = style;
            next.strong = true;
            for child in node.children() {
                collect_spans_into(child, next, spans);
            }
        }
        NodeValue::Strikethrough => {
            let mut next = style;
            next.strikethrough = true;
            for child in node.children() {
                collect_spans_into(child, next, spans);
            }
        }
        NodeValue::Link(_) => {
            let mut next = style;
            next.link = true;
            for child in node.children() {
                collect_spans_into(child, next, spans);
            }
        }
        NodeValue::Image(image) => {
            let alt = extract_text(node);
            let label = if alt.is_empty() { &image.url } else { &alt };
            spans.push(InlineSpan::new(format!("[Image: {label}]"), style));
        }
        NodeValue::SoftBreak | NodeValue::LineBreak => {
            spans.push(InlineSpan::new(" ".to_string(), style));
        }
        _ => {
            for child in node.children() {
                collect_spans_into(child, style, spans);
            }
        }
    }
}

/// When a paragraph holds nothing but one image, render it as a placeholder
/// line instead of inline text.
fn sole_image<'a>(node: &'a AstNode<'a>) -> Option<(String, String)> {
    let mut children = node.children();
    let only = children.next()?;
    if children.next().is_some() {
        return None;
    }
    match &only.data.borrow().value {
        NodeValue::Image(image) => Some((extract_text(only), image.url.clone())),
        _ => None,
    }
}

/// Marker for a task item, whether comrak exposes it as the item node or as
/// a direct child. Does not recurse so nested task lists keep their own
/// markers.
fn task_marker<'a>(node: &'a AstNode<'a>) -> Option<&'static str> {
    let marker = |symbol: &Option<char>| {
        if symbol.is_some() { "✓" } else { "□" }
    };
    if let NodeValue::TaskItem(symbol) = &node.data.borrow().value {
        return Some(marker(symbol));
    }
    for child in node.children() {
        if let NodeValue::TaskItem(symbol) = &child.data.borrow().value {
            return Some(marker(symbol));
        }
    }
    None
}

fn wrap_spans(
    spans: &[InlineSpan],
    width: usize,
    prefix_first: &str,
    prefix_next: &str,
) -> Vec<Vec<InlineSpan>> {
    let tokens: Vec<InlineSpan> = spans.iter().flat_map(split_tokens).collect();

    let mut lines: Vec<Vec<InlineSpan>> = Vec::new();
    let mut current: Vec<InlineSpan> = Vec::new();
    let mut current_len = 0usize;
    let mut has_word = false;

    let fresh_line = |prefix: &str| -> (Vec<InlineSpan>, usize) {
        if prefix.is_empty() {
            (Vec::new(), 0)
        } else {
            (
                vec![InlineSpan::new(prefix.to_string(), InlineStyle::default())],
                prefix.chars().count(),
            )
        }
    };

    (current, current_len) = fresh_line(prefix_first);

    for token in tokens {
        let token_len = token.text().chars().count();
        let token_is_ws = token.text().chars().all(char::is_whitespace);

        if has_word && current_len + token_len > width {
            lines.push(current);
            (current, current_len) = fresh_line(prefix_next);
            has_word = false;
        }

        // Drop leading whitespace at wrapped line starts.
        if token_is_ws && !has_word {
            continue;
        }

        current_len += token_len;
        current.push(token);
        if !token_is_ws {
            has_word = true;
        }
    }

    if current.is_empty() && !prefix_first.is_empty() {
        (current, _) = fresh_line(prefix_first);
    }
    lines.push(current);
    lines
}

/// Split a span at whitespace boundaries so wrapping can break between words.
fn split_tokens(span: &InlineSpan) -> Vec<InlineSpan> {
    let mut tokens = Vec::new();
    let mut chunk = String::new();
    let mut chunk_is_ws: Option<bool> = None;

    for ch in span.text().chars() {
        let is_ws = ch.is_whitespace();
        if chunk_is_ws != Some(is_ws) && !chunk.is_empty() {
            tokens.push(InlineSpan::new(std::mem::take(&mut chunk), span.style()));
        }
        chunk.push(ch);
        chunk_is_ws = Some(is_ws);
    }
    if !chunk.is_empty() {
        tokens.push(InlineSpan::new(chunk, span.style()));
    }
    tokens
}

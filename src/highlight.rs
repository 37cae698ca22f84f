//! Syntax highlighting for fenced code blocks.
//!
//! Uses syntect with the bundled Sublime Text syntax definitions. Code with
//! an unrecognized language tag falls back to plain code styling, matching
//! how inline code renders.

use std::sync::OnceLock;

use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::SyntaxSet;

use crate::preview::{InlineColor, InlineSpan, InlineStyle};

/// Theme background the highlighter should assume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    Light,
    Dark,
}

static BACKGROUND: OnceLock<Background> = OnceLock::new();

/// Fix the highlight background for this process.
///
/// Must be called before the first highlight; later calls are ignored. When
/// never called, the background is inferred from `COLORFGBG` (dark when
/// absent).
pub fn set_background(mode: Background) {
    let _ = BACKGROUND.set(mode);
}

/// Whether the highlighter assumes a light terminal background.
pub fn is_light_background() -> bool {
    background() == Background::Light
}

fn background() -> Background {
    *BACKGROUND
        .get_or_init(|| background_from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref()))
}

fn background_from_colorfgbg(colorfgbg: Option<&str>) -> Background {
    let Some(value) = colorfgbg else {
        return Background::Dark;
    };
    let bg = value.rsplit(';').next().unwrap_or(value);
    match bg.parse::<u8>() {
        Ok(code) if code >= 7 => Background::Light,
        _ => Background::Dark,
    }
}

/// Highlight a code block into per-line styled spans.
///
/// Lines come back in source order, one `Vec<InlineSpan>` per line. When the
/// language is `None` or not recognized by syntect, every line is a single
/// plain span with only the code flag set.
pub fn highlight_code(language: Option<&str>, code: &str) -> Vec<Vec<InlineSpan>> {
    let set = syntax_set();
    let syntax = language.and_then(|lang| {
        set.find_syntax_by_token(lang)
            .or_else(|| set.find_syntax_by_name(lang))
    });

    let Some(syntax) = syntax else {
        return code
            .lines()
            .map(|line| vec![InlineSpan::new(line.to_string(), InlineStyle::code())])
            .collect();
    };

    let mut highlighter = HighlightLines::new(syntax, theme());
    code.lines()
        .map(|line| {
            let ranges = highlighter.highlight_line(line, set).unwrap_or_default();
            ranges
                .into_iter()
                .map(|(style, text)| {
                    let mut inline = InlineStyle::code();
                    inline.fg = Some(InlineColor {
                        r: style.foreground.r,
                        g: style.foreground.g,
                        b: style.foreground.b,
                    });
                    InlineSpan::new(text.to_string(), inline)
                })
                .collect()
        })
        .collect()
}

fn syntax_set() -> &'static SyntaxSet {
    static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn theme() -> &'static Theme {
    static THEME: OnceLock<Theme> = OnceLock::new();
    THEME.get_or_init(|| {
        let themes = ThemeSet::load_defaults();
        let preferred: &[&str] = match background() {
            Background::Dark => &["base16-ocean.dark", "Solarized (dark)"],
            Background::Light => &["InspiredGitHub", "Solarized (light)"],
        };
        preferred
            .iter()
            .find_map(|name| themes.themes.get(*name).cloned())
            .unwrap_or_else(|| themes.themes.values().next().cloned().unwrap_or_default())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_rust_produces_colored_spans() {
        let lines = highlight_code(Some("rust"), "fn main() {\n    let x = 1;\n}\n");
        assert_eq!(lines.len(), 3);
        let has_color = lines.iter().flatten().any(|s| s.style().fg.is_some());
        assert!(has_color, "expected at least one colored span for Rust");
    }

    #[test]
    fn test_unknown_language_falls_back_to_plain_code() {
        let lines = highlight_code(Some("nope"), "just text");
        assert_eq!(lines.len(), 1);
        assert!(lines[0].iter().all(|s| s.style().code));
        assert!(lines[0].iter().all(|s| s.style().fg.is_none()));
    }

    #[test]
    fn test_no_language_is_plain_code() {
        let lines = highlight_code(None, "plain");
        assert_eq!(lines.len(), 1);
        assert!(lines[0][0].style().code);
    }

    #[test]
    fn test_colorfgbg_parsing() {
        assert_eq!(background_from_colorfgbg(Some("15;0")), Background::Dark);
        assert_eq!(background_from_colorfgbg(Some("0;15")), Background::Light);
        assert_eq!(background_from_colorfgbg(Some("garbage")), Background::Dark);
        assert_eq!(background_from_colorfgbg(None), Background::Dark);
    }
}

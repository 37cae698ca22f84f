//! Export to Markdown, HTML, PDF and DOCX.
//!
//! Markdown exports are the document bytes untouched. HTML exports wrap the
//! comrak-rendered body in a styled standalone page. PDF export writes a
//! print-ready page and opens it in the system browser, whose print dialog
//! produces the PDF. DOCX export converts the rendered HTML with pandoc.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::info;

use crate::preview::markdown_options;

/// Export formats offered by the export menu, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Markdown,
    Html,
    Pdf,
    Docx,
}

impl ExportFormat {
    pub const ALL: [Self; 4] = [Self::Markdown, Self::Html, Self::Pdf, Self::Docx];

    /// Label shown in the export menu and toasts.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Markdown => "Markdown",
            Self::Html => "HTML",
            Self::Pdf => "PDF (browser print)",
            Self::Docx => "Word (DOCX)",
        }
    }

    /// Output file name for this format.
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Markdown => "document.md",
            Self::Html => "document.html",
            Self::Pdf => "document-print.html",
            Self::Docx => "document.docx",
        }
    }

    /// Look up a format by its menu digit (1-based).
    pub const fn from_digit(digit: char) -> Option<Self> {
        match digit {
            '1' => Some(Self::Markdown),
            '2' => Some(Self::Html),
            '3' => Some(Self::Pdf),
            '4' => Some(Self::Docx),
            _ => None,
        }
    }
}

/// Errors surfaced by an export attempt.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not open the browser for printing")]
    BrowserLaunch(#[source] std::io::Error),
    #[error("pandoc not found; install pandoc for DOCX export")]
    PandocMissing(#[source] std::io::Error),
    #[error("pandoc failed: {stderr}")]
    PandocFailed { stderr: String },
}

/// What an export produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exported {
    /// A file written to the export directory.
    File(PathBuf),
    /// A print-ready page handed to the browser.
    PrintPage(PathBuf),
}

/// Render the markdown body to an HTML fragment, using the same GFM
/// extensions as the preview.
pub fn render_html_body(source: &str) -> String {
    comrak::markdown_to_html(source, &markdown_options())
}

const PAGE_STYLE: &str = "\
body { max-width: 48rem; margin: 2rem auto; padding: 0 1rem;
  font-family: -apple-system, 'Segoe UI', Roboto, sans-serif;
  line-height: 1.6; color: #24292f; }
h1, h2 { border-bottom: 1px solid #d0d7de; padding-bottom: .3em; }
code { background: #f6f8fa; padding: .15em .35em; border-radius: 4px;
  font-family: ui-monospace, 'SF Mono', Consolas, monospace; font-size: .9em; }
pre { background: #f6f8fa; padding: 1em; border-radius: 6px; overflow-x: auto; }
pre code { background: none; padding: 0; }
blockquote { margin: 0; padding-left: 1em; border-left: .25em solid #d0d7de;
  color: #57606a; }
table { border-collapse: collapse; }
th, td { border: 1px solid #d0d7de; padding: .4em .8em; }
th { background: #f6f8fa; }
img { max-width: 100%; }
hr { border: none; border-top: 1px solid #d0d7de; }";

/// Wrap an HTML fragment into a standalone page.
pub fn wrap_html_document(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>\n{PAGE_STYLE}\n</style>\n</head>\n\
         <body>\n{body}</body>\n</html>\n"
    )
}

/// Wrap an HTML fragment into a page that opens the print dialog on load.
pub fn wrap_print_document(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>\n{PAGE_STYLE}\n\
         @media print {{ body {{ margin: 0; max-width: none; }} }}\n</style>\n</head>\n\
         <body onload=\"window.print()\">\n{body}</body>\n</html>\n"
    )
}

/// Writes export files and drives the external converters.
#[derive(Debug, Clone)]
pub struct Exporter {
    out_dir: PathBuf,
    pandoc_bin: PathBuf,
}

impl Exporter {
    pub fn new(out_dir: PathBuf, pandoc_bin: Option<PathBuf>) -> Self {
        Self {
            out_dir,
            pandoc_bin: pandoc_bin.unwrap_or_else(|| PathBuf::from("pandoc")),
        }
    }

    /// Export the document text in the given format.
    pub fn export(&self, format: ExportFormat, source: &str) -> Result<Exported, ExportError> {
        let path = self.out_dir.join(format.file_name());
        info!(format = format.label(), path = %path.display(), "exporting");

        match format {
            ExportFormat::Markdown => {
                // The markdown file is the document, byte for byte.
                write_file(&path, source.as_bytes())?;
                Ok(Exported::File(path))
            }
            ExportFormat::Html => {
                let page = wrap_html_document("document", &render_html_body(source));
                write_file(&path, page.as_bytes())?;
                Ok(Exported::File(path))
            }
            ExportFormat::Pdf => {
                let page = wrap_print_document("document", &render_html_body(source));
                let path = std::env::temp_dir().join(format.file_name());
                write_file(&path, page.as_bytes())?;
                webbrowser::open(&path.display().to_string())
                    .map_err(ExportError::BrowserLaunch)?;
                Ok(Exported::PrintPage(path))
            }
            ExportFormat::Docx => {
                let page = wrap_html_document("document", &render_html_body(source));
                std::fs::create_dir_all(&self.out_dir).map_err(|source| ExportError::Write {
                    path: self.out_dir.clone(),
                    source,
                })?;
                self.run_pandoc(&page, &path)?;
                Ok(Exported::File(path))
            }
        }
    }

    fn run_pandoc(&self, html: &str, out_path: &Path) -> Result<(), ExportError> {
        let mut child = Command::new(&self.pandoc_bin)
            .args(["-f", "html", "-t", "docx", "-o"])
            .arg(out_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(ExportError::PandocMissing)?;

        if let Some(stdin) = child.stdin.take() {
            let mut stdin = stdin;
            stdin
                .write_all(html.as_bytes())
                .map_err(|source| ExportError::Write {
                    path: out_path.to_path_buf(),
                    source,
                })?;
        }

        let output = child.wait_with_output().map_err(|source| ExportError::Write {
            path: out_path.to_path_buf(),
            source,
        })?;
        if output.status.success() {
            Ok(())
        } else {
            Err(ExportError::PandocFailed {
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    let wrap = |source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(wrap)?;
    }
    std::fs::write(path, bytes).map_err(wrap)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_menu_digits() {
        assert_eq!(ExportFormat::from_digit('1'), Some(ExportFormat::Markdown));
        assert_eq!(ExportFormat::from_digit('4'), Some(ExportFormat::Docx));
        assert_eq!(ExportFormat::from_digit('5'), None);
    }

    #[test]
    fn test_html_body_renders_gfm() {
        let body = render_html_body("~~gone~~ and | a |\n| - |\n| b |");
        assert!(body.contains("<del>"));
        assert!(body.contains("<table>"));
    }

    #[test]
    fn test_wrapped_page_is_standalone() {
        let page = wrap_html_document("document", "<p>hi</p>");
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<style>"));
        assert!(page.contains("<p>hi</p>"));
    }

    #[test]
    fn test_print_page_triggers_print() {
        let page = wrap_print_document("document", "<p>hi</p>");
        assert!(page.contains("window.print()"));
        assert!(page.contains("@media print"));
    }

    #[test]
    fn test_markdown_export_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = Exporter::new(dir.path().to_path_buf(), None);
        let source = "# Title\n\nno trailing newline";
        let Exported::File(path) = exporter.export(ExportFormat::Markdown, source).unwrap()
        else {
            panic!("markdown export should write a file");
        };
        assert_eq!(std::fs::read(path).unwrap(), source.as_bytes());
    }

    #[test]
    fn test_html_export_writes_wrapped_page() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = Exporter::new(dir.path().to_path_buf(), None);
        let Exported::File(path) = exporter.export(ExportFormat::Html, "# Hello").unwrap()
        else {
            panic!("html export should write a file");
        };
        let page = std::fs::read_to_string(path).unwrap();
        assert!(page.contains("<h1>Hello</h1>"));
        assert!(page.starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn test_docx_with_missing_pandoc_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = Exporter::new(
            dir.path().to_path_buf(),
            Some(PathBuf::from("/nonexistent/pandoc")),
        );
        let err = exporter.export(ExportFormat::Docx, "# Hello").unwrap_err();
        assert!(matches!(err, ExportError::PandocMissing(_)));
    }
}

//! Side effects the pure [`update`](super::update) function cannot perform:
//! background file reads and exports.

use std::path::PathBuf;

use tracing::warn;

use crate::app::{App, Message, Model, ToastLevel};
use crate::export::Exported;
use crate::ingest;

impl App {
    /// Dispatch any side effect a message implies. Runs before `update`,
    /// so prompt text is still present for `PromptSubmit`.
    pub(super) fn run_effects(&mut self, model: &mut Model, msg: &Message) {
        match msg {
            Message::PromptSubmit => {
                let Some(text) = model.open_prompt.take() else {
                    return;
                };
                let text = text.trim();
                if text.is_empty() {
                    return;
                }
                self.open_paths(model, &[PathBuf::from(text)]);
            }
            Message::RequestOpen(paths) => self.open_paths(model, paths),
            Message::Export(format) => {
                let source = model.buffer.text();
                match self.exporter.export(*format, &source) {
                    Ok(Exported::File(path)) => {
                        model.show_toast(
                            ToastLevel::Info,
                            format!("Exported {}", path.display()),
                        );
                    }
                    Ok(Exported::PrintPage(_)) => {
                        model.show_toast(
                            ToastLevel::Info,
                            "Opened print page in browser; use Save as PDF",
                        );
                    }
                    Err(error) => {
                        warn!(%error, "export failed");
                        model.show_toast(ToastLevel::Error, format!("Export failed: {error}"));
                    }
                }
            }
            _ => {}
        }
    }

    /// Accept the first markdown file and report everything else.
    pub(super) fn open_paths(&mut self, model: &mut Model, paths: &[PathBuf]) {
        let (accepted, rejected) = ingest::select_candidate(paths);

        for path in rejected {
            // Surplus markdown files behind the first are ignored quietly;
            // only unsupported types warrant a warning.
            if ingest::is_markdown_file(path) {
                continue;
            }
            let name = display_name(path);
            model.show_toast(
                ToastLevel::Warning,
                format!("Ignored {name}: only .md and .markdown files open here"),
            );
        }

        let Some(path) = accepted else {
            return;
        };
        if !path.is_file() {
            model.show_toast(
                ToastLevel::Error,
                format!("No such file: {}", path.display()),
            );
            return;
        }
        self.reader.request(path);
    }
}

fn display_name(path: &std::path::Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{DragState, Focus, Menu, Model, ToastLevel, Zoom};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::export::Exporter;
use crate::ingest::FileReader;
use crate::ui::DEFAULT_SPLIT_PERCENT;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    initial_file: Option<PathBuf>,
    split_percent: u16,
    exporter: Exporter,
    reader: FileReader,
}

impl App {
    /// Create a new application. Exports land in the current directory
    /// unless [`with_exporter`](Self::with_exporter) overrides it.
    pub fn new() -> Self {
        Self {
            initial_file: None,
            split_percent: DEFAULT_SPLIT_PERCENT,
            exporter: Exporter::new(PathBuf::from("."), None),
            reader: FileReader::new(),
        }
    }

    /// Load this file on startup.
    pub fn with_file(mut self, file: Option<PathBuf>) -> Self {
        self.initial_file = file;
        self
    }

    /// Set the initial editor pane width as a percentage of the frame.
    pub const fn with_split_percent(mut self, percent: u16) -> Self {
        self.split_percent = percent;
        self
    }

    /// Set the export directory and pandoc binary.
    pub fn with_exporter(mut self, out_dir: PathBuf, pandoc_bin: Option<PathBuf>) -> Self {
        self.exporter = Exporter::new(out_dir, pandoc_bin);
        self
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

//! File acceptance and asynchronous reading.
//!
//! Dropped or opened files are read off the UI thread. Reads carry a
//! generation number so that when several requests overlap, only the most
//! recent one can reach the document. Stale completions are discarded.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread;

use tracing::debug;

/// Extensions accepted for import.
const MARKDOWN_EXTENSIONS: [&str; 2] = ["md", "markdown"];

/// Whether a path names a markdown file we accept, by extension
/// (case-insensitive).
pub fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            let ext = ext.to_ascii_lowercase();
            MARKDOWN_EXTENSIONS.contains(&ext.as_str())
        })
}

/// Split candidate paths into the one to load and the rejected remainder.
///
/// When several markdown files arrive at once only the first is loaded.
pub fn select_candidate(paths: &[PathBuf]) -> (Option<&PathBuf>, Vec<&PathBuf>) {
    let mut accepted = None;
    let mut rejected = Vec::new();
    for path in paths {
        if accepted.is_none() && is_markdown_file(path) {
            accepted = Some(path);
        } else {
            rejected.push(path);
        }
    }
    (accepted, rejected)
}

/// Outcome of a background file read.
#[derive(Debug)]
pub struct ReadOutcome {
    pub name: String,
    pub result: std::io::Result<String>,
    generation: u64,
}

/// Reads files on background threads, latest request wins.
#[derive(Debug)]
pub struct FileReader {
    tx: Sender<ReadOutcome>,
    rx: Receiver<ReadOutcome>,
    generation: u64,
}

impl Default for FileReader {
    fn default() -> Self {
        Self::new()
    }
}

impl FileReader {
    pub fn new() -> Self {
        let (tx, rx) = channel();
        Self {
            tx,
            rx,
            generation: 0,
        }
    }

    /// Start reading `path` in the background.
    ///
    /// Any read still in flight is implicitly cancelled: its outcome will
    /// carry an older generation and be dropped by [`Self::try_take`].
    pub fn request(&mut self, path: &Path) {
        self.generation += 1;
        let generation = self.generation;
        let name = path.file_name().map_or_else(
            || path.display().to_string(),
            |n| n.to_string_lossy().into_owned(),
        );
        let path = path.to_path_buf();
        let tx = self.tx.clone();

        thread::spawn(move || {
            let result = std::fs::read_to_string(&path);
            // The receiver may be gone during shutdown.
            let _ = tx.send(ReadOutcome {
                name,
                result,
                generation,
            });
        });
    }

    /// Take the next completed read, if it is still the current one.
    pub fn try_take(&self) -> Option<ReadOutcome> {
        while let Ok(outcome) = self.rx.try_recv() {
            if outcome.generation == self.generation {
                return Some(outcome);
            }
            debug!(name = %outcome.name, "dropping stale file read");
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::{Duration, Instant};

    fn wait_for(reader: &FileReader) -> Option<ReadOutcome> {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if let Some(outcome) = reader.try_take() {
                return Some(outcome);
            }
            thread::sleep(Duration::from_millis(10));
        }
        None
    }

    #[test]
    fn test_markdown_extensions_accepted() {
        assert!(is_markdown_file(Path::new("notes.md")));
        assert!(is_markdown_file(Path::new("notes.markdown")));
        assert!(is_markdown_file(Path::new("NOTES.MD")));
    }

    #[test]
    fn test_other_extensions_rejected() {
        assert!(!is_markdown_file(Path::new("notes.txt")));
        assert!(!is_markdown_file(Path::new("archive.md.gz")));
        assert!(!is_markdown_file(Path::new("README")));
    }

    #[test]
    fn test_select_candidate_takes_first_markdown() {
        let paths = vec![
            PathBuf::from("a.txt"),
            PathBuf::from("b.md"),
            PathBuf::from("c.md"),
        ];
        let (accepted, rejected) = select_candidate(&paths);
        assert_eq!(accepted, Some(&PathBuf::from("b.md")));
        assert_eq!(rejected.len(), 2);
    }

    #[test]
    fn test_select_candidate_none_markdown() {
        let paths = vec![PathBuf::from("a.txt")];
        let (accepted, rejected) = select_candidate(&paths);
        assert!(accepted.is_none());
        assert_eq!(rejected.len(), 1);
    }

    #[test]
    fn test_read_completes_with_content() {
        let mut file = tempfile::NamedTempFile::with_suffix(".md").unwrap();
        write!(file, "# from disk").unwrap();

        let mut reader = FileReader::new();
        reader.request(file.path());
        let outcome = wait_for(&reader).expect("read should complete");
        assert_eq!(outcome.result.unwrap(), "# from disk");
    }

    #[test]
    fn test_read_missing_file_reports_error() {
        let mut reader = FileReader::new();
        reader.request(Path::new("/nonexistent/missing.md"));
        let outcome = wait_for(&reader).expect("read should complete");
        assert!(outcome.result.is_err());
    }

    #[test]
    fn test_stale_read_is_dropped() {
        let mut first = tempfile::NamedTempFile::with_suffix(".md").unwrap();
        write!(first, "first").unwrap();
        let mut second = tempfile::NamedTempFile::with_suffix(".md").unwrap();
        write!(second, "second").unwrap();

        let mut reader = FileReader::new();
        reader.request(first.path());
        reader.request(second.path());

        // Only the newest request may surface, however the reads interleave.
        let outcome = wait_for(&reader).expect("read should complete");
        assert_eq!(outcome.result.unwrap(), "second");
        assert!(reader.try_take().is_none());
    }
}

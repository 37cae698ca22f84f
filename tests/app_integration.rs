//! End-to-end checks across the public API: edit a document through update
//! messages, watch the preview follow, and export the result.

use markpane::app::{Message, Model, update};
use markpane::export::{Exported, ExportFormat, Exporter};
use markpane::stats::document_stats;

fn type_text(mut model: Model, text: &str) -> Model {
    for ch in text.chars() {
        model = if ch == '\n' {
            update(model, Message::InsertNewline)
        } else {
            update(model, Message::InsertChar(ch))
        };
    }
    model
}

#[test]
fn test_typing_updates_preview_and_stats() {
    let model = Model::new((100, 30), 50);
    let model = type_text(model, "# Notes\n\nfirst thought");

    assert!(model.preview.line_count() > 0);

    let stats = document_stats(&model.buffer.text());
    assert_eq!(stats.words, 4, "the heading marker counts as a token");
    assert_eq!(stats.lines, 3);
}

#[test]
fn test_edited_document_exports_byte_identical_markdown() {
    let dir = tempfile::tempdir().unwrap();
    let source = "# Draft\n\nA *styled* line.";

    let model = Model::new((100, 30), 50);
    let model = type_text(model, source);

    let exporter = Exporter::new(dir.path().to_path_buf(), None);
    let Exported::File(path) = exporter
        .export(ExportFormat::Markdown, &model.buffer.text())
        .unwrap()
    else {
        panic!("markdown export should write a file");
    };

    assert_eq!(std::fs::read_to_string(path).unwrap(), source);
}

#[test]
fn test_loaded_file_round_trips_through_model() {
    let dir = tempfile::tempdir().unwrap();
    let source = "# From disk\n\n- a\n- b\n";
    let path = dir.path().join("notes.md");
    std::fs::write(&path, source).unwrap();

    let model = Model::new((100, 30), 50);
    let model = update(
        model,
        Message::FileLoaded {
            name: "notes.md".to_string(),
            text: std::fs::read_to_string(&path).unwrap(),
        },
    );

    assert_eq!(model.buffer.text(), source);
    assert_eq!(model.source_name.as_deref(), Some("notes.md"));
    assert!(!model.buffer.is_dirty());
}

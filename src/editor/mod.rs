//! The document text buffer.

mod buffer;

pub use buffer::{Cursor, Direction, EditorBuffer};

//! Visual page editor state
//!
//! Element tree editing with selection, undo/redo and periodic auto-save
//! through a [`PageSink`] (implemented by the API client).

mod autosave;
mod document;
mod history;

pub use autosave::{AutoSaveHandle, AutoSaver, PageSink};
pub use document::{EditorDocument, EditorError, Inspector, PageDraft, SeoMetadata};
pub use history::{History, DEFAULT_HISTORY_LIMIT};

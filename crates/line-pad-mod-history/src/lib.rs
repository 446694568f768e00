/// Linear undo/redo history for line-oriented documents.
///
/// Provides an `UndoManager` that keeps edit records on an undo stack and a
/// redo stack. Any new edit invalidates the redo stack. History lives in
/// memory only and is dropped together with its document.
pub mod config;
pub mod manager;
pub mod operation;

pub use config::HistoryConfig;
pub use manager::{Discarded, UndoManager};
pub use operation::{EditRecord, LineId};

//! Line-oriented text editing with linear undo/redo.
//!
//! [`Document`] stores the lines; [`LineEditor`] wraps every document
//! mutation with an undo record and answers the read-only queries used by
//! the console front end.
pub mod document;
pub mod editor;
pub mod history;
pub mod search;

pub use document::{Document, Lines};
pub use editor::LineEditor;
pub use history::{Discarded, EditRecord, HistoryConfig, LineId, UndoManager};
pub use search::{LineReplacer, SearchOptions};

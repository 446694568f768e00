// Re-exports from line-pad-mod-history so callers of the core crate don't
// need a direct dependency on the history crate.
pub use line_pad_mod_history::{Discarded, EditRecord, HistoryConfig, LineId, UndoManager};

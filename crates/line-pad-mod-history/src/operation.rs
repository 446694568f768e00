/// Core types for edit records.
use std::fmt;

/// Stable handle to a line entry stored in a document arena.
///
/// Handles stay valid while the entry is detached from the live sequence,
/// which is what lets a removed line be put back exactly where it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineId(pub usize);

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single reversible edit.
///
/// The variant states which operation produced the record, so undo and redo
/// never have to guess it from the shape of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditRecord {
    /// A line was appended at the end of the document.
    Inserted {
        /// The appended entry.
        line: LineId,
    },
    /// A line was removed from the document.
    Deleted {
        /// The removed entry, kept alive while the record exists.
        line: LineId,
        /// 0-indexed position the entry occupied before removal.
        position: usize,
    },
}

impl EditRecord {
    /// Returns the line entry this record refers to.
    pub fn line(&self) -> LineId {
        match *self {
            EditRecord::Inserted { line } | EditRecord::Deleted { line, .. } => line,
        }
    }

    /// Whether the referenced entry is detached from the document while this
    /// record sits on the undo stack.
    ///
    /// A deleted line is detached until the deletion is undone. An inserted
    /// line is live until the insertion is undone.
    pub fn detaches_on_undo_stack(&self) -> bool {
        matches!(self, EditRecord::Deleted { .. })
    }

    /// Whether the referenced entry is detached while this record sits on the
    /// redo stack. Always the opposite of [`Self::detaches_on_undo_stack`].
    pub fn detaches_on_redo_stack(&self) -> bool {
        !self.detaches_on_undo_stack()
    }
}

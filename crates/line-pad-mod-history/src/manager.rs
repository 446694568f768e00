/// Core undo/redo manager.
///
/// Records live on two stacks. Undo moves the newest record from the undo
/// stack to the redo stack, redo moves it back. Recording a new edit clears
/// the redo stack, so history stays strictly linear.
use crate::config::HistoryConfig;
use crate::operation::{EditRecord, LineId};

/// Records dropped from history by [`UndoManager::record`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Discarded {
    /// Cleared redo records, bottom of the stack first.
    pub redo: Vec<EditRecord>,
    /// Oldest undo records evicted by the depth limit.
    pub evicted: Vec<EditRecord>,
}

impl Discarded {
    /// Whether nothing was dropped.
    pub fn is_empty(&self) -> bool {
        self.redo.is_empty() && self.evicted.is_empty()
    }

    /// Total number of dropped records.
    pub fn len(&self) -> usize {
        self.redo.len() + self.evicted.len()
    }

    /// Lines whose entries were left detached by the dropped records.
    ///
    /// A record that left the redo stack had its line detached if undoing it
    /// detached the line; an evicted undo record, if applying it did. No
    /// remaining record can refer to these lines.
    pub fn detached_lines(&self) -> impl Iterator<Item = LineId> + '_ {
        let redo = self
            .redo
            .iter()
            .filter(|rec| rec.detaches_on_redo_stack());
        let evicted = self
            .evicted
            .iter()
            .filter(|rec| rec.detaches_on_undo_stack());
        redo.chain(evicted).map(EditRecord::line)
    }
}

/// Manages undo/redo history for a single document.
///
/// The manager only does bookkeeping. The document owner applies the
/// returned records and releases any line entries referenced by records that
/// [`UndoManager::record`] discards.
pub struct UndoManager {
    /// Undo stack, oldest first.
    undo_stack: Vec<EditRecord>,
    /// Redo stack, most-recently-undone on top.
    redo_stack: Vec<EditRecord>,
    /// Whether recording is active (set to false during bulk replay).
    recording: bool,
    /// Configuration parameters.
    config: HistoryConfig,
}

impl std::fmt::Debug for UndoManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UndoManager")
            .field("undo_len", &self.undo_stack.len())
            .field("redo_len", &self.redo_stack.len())
            .field("recording", &self.recording)
            .field("max_history_depth", &self.config.max_history_depth)
            .finish()
    }
}

impl Default for UndoManager {
    fn default() -> Self {
        Self::new(HistoryConfig::default())
    }
}

impl UndoManager {
    /// Creates a new empty UndoManager.
    pub fn new(config: HistoryConfig) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            recording: true,
            config,
        }
    }

    /// Records an edit.
    ///
    /// Clears the redo stack and evicts the oldest undo records beyond
    /// `max_history_depth`. Returns every record that left the history so
    /// the caller can free what they refer to.
    /// Returns nothing and records nothing while recording is paused.
    pub fn record(&mut self, rec: EditRecord) -> Discarded {
        let mut discarded = Discarded::default();
        if !self.recording {
            return discarded;
        }

        discarded.redo = std::mem::take(&mut self.redo_stack);
        if !discarded.redo.is_empty() {
            tracing::debug!("New edit discarded {} redo record(s)", discarded.redo.len());
        }

        self.undo_stack.push(rec);

        let depth = self.config.max_history_depth.max(1);
        if self.undo_stack.len() > depth {
            let excess = self.undo_stack.len() - depth;
            tracing::trace!("Evicting {excess} oldest undo record(s)");
            discarded.evicted = self.undo_stack.drain(..excess).collect();
        }

        discarded
    }

    /// Pops the most recent edit and moves it to the redo stack.
    ///
    /// Returns the record to reverse, or `None` if there's nothing to undo.
    pub fn undo(&mut self) -> Option<EditRecord> {
        let rec = self.undo_stack.pop()?;
        self.redo_stack.push(rec);
        Some(rec)
    }

    /// Pops the most recently undone edit and moves it back to the undo stack.
    ///
    /// Returns the record to reapply, or `None` if there's nothing to redo.
    pub fn redo(&mut self) -> Option<EditRecord> {
        let rec = self.redo_stack.pop()?;
        self.undo_stack.push(rec);
        Some(rec)
    }

    /// Whether undo is available.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Whether redo is available.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of records on the undo stack.
    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of records on the redo stack.
    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Temporarily disables recording.
    pub fn pause_recording(&mut self) {
        self.recording = false;
    }

    /// Re-enables recording after a pause.
    pub fn resume_recording(&mut self) {
        self.recording = true;
    }

    /// Clears both stacks.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

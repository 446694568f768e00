//! Editor combining a line document with its undo/redo history.
//!
//! Every insert and delete goes through `LineEditor`, which mutates the
//! document and records the edit in one step. Read-only queries used by the
//! console front end live here as well; file I/O is in the `io` submodule.

mod io;

use std::io::Write;

use anyhow::Result;

use crate::document::Document;
use crate::history::{Discarded, EditRecord, HistoryConfig, UndoManager};
use crate::search::{LineReplacer, SearchOptions};

/// A line document with linear undo/redo.
#[derive(Debug, Default)]
pub struct LineEditor {
    document: Document,
    history: UndoManager,
}

impl LineEditor {
    /// Creates an empty editor with the default history configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty editor with the given history configuration.
    pub fn with_config(config: HistoryConfig) -> Self {
        Self {
            document: Document::new(),
            history: UndoManager::new(config),
        }
    }

    /// The underlying document (read-only).
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The undo/redo history (read-only).
    pub fn history(&self) -> &UndoManager {
        &self.history
    }

    /// Appends `text` as a new last line.
    ///
    /// Discards any pending redo history.
    pub fn insert(&mut self, text: &str) {
        let line = self.document.append_line(text);
        self.record(EditRecord::Inserted { line });
    }

    /// Removes the last line. No-op on an empty document.
    ///
    /// Discards any pending redo history when a line was removed.
    pub fn delete_last(&mut self) {
        let Some(line) = self.document.remove_last_line() else {
            tracing::debug!("Delete requested on an empty document");
            return;
        };
        let position = self.document.len();
        self.record(EditRecord::Deleted { line, position });
    }

    /// Reverses the most recent edit. No-op if there's nothing to undo.
    pub fn undo(&mut self) {
        let Some(rec) = self.history.undo() else {
            tracing::debug!("Nothing to undo");
            return;
        };
        let applied = match rec {
            EditRecord::Inserted { line } => self.document.detach(line).is_some(),
            EditRecord::Deleted { line, position } => self.document.attach_at(line, position),
        };
        if !applied {
            tracing::warn!("Undo of {rec:?} did not match the document state");
        }
    }

    /// Reapplies the most recently undone edit. No-op if there's nothing to redo.
    pub fn redo(&mut self) {
        let Some(rec) = self.history.redo() else {
            tracing::debug!("Nothing to redo");
            return;
        };
        let applied = match rec {
            EditRecord::Inserted { line } => self.document.reattach_at_end(line),
            EditRecord::Deleted { line, position } => {
                let removed_from = self.document.detach(line);
                debug_assert!(removed_from.is_none() || removed_from == Some(position));
                removed_from.is_some()
            }
        };
        if !applied {
            tracing::warn!("Redo of {rec:?} did not match the document state");
        }
    }

    /// Whether undo is available.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether redo is available.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Destroys every line and empties both history stacks.
    pub fn clear(&mut self) {
        self.document.clear();
        self.history.clear();
    }

    /// Replaces the whole content with the lines of `text`.
    ///
    /// Each line is inserted as its own undoable edit. The console front end
    /// loads files with [`Self::open`] instead; this is for library callers
    /// that want the loaded lines in the undo history.
    pub fn set_text(&mut self, text: &str) {
        self.clear();
        for line in text.lines() {
            self.insert(line);
        }
    }

    /// All lines, each followed by a line break.
    pub fn get_text(&self) -> String {
        let mut text = String::new();
        for line in self.document.lines() {
            text.push_str(line);
            text.push('\n');
        }
        text
    }

    /// Writes each line to stdout, one per line.
    ///
    /// # Errors
    ///
    /// Returns an error if stdout cannot be written.
    pub fn display(&self) -> std::io::Result<()> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.display_to(&mut out)
    }

    /// Writes each line to `out`, one per line.
    ///
    /// # Errors
    ///
    /// Returns an error if `out` cannot be written.
    pub fn display_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        for line in self.document.lines() {
            writeln!(out, "{line}")?;
        }
        out.flush()
    }

    /// Number of lines.
    pub fn line_count(&self) -> usize {
        self.document.len()
    }

    /// Returns true if there are no lines.
    pub fn is_empty(&self) -> bool {
        self.document.is_empty()
    }

    /// Number of whitespace-delimited words across all lines.
    pub fn count_words(&self) -> usize {
        self.document
            .lines()
            .map(|line| line.split_whitespace().count())
            .sum()
    }

    /// Number of sentences, one per stored line.
    pub fn count_sentences(&self) -> usize {
        self.document.len()
    }

    /// Text of the 1-indexed line `line_number`, or `None` if out of range.
    ///
    /// Line 0 counts as out of range; it is not clamped to the first line.
    pub fn go_to_line(&self, line_number: usize) -> Option<&str> {
        let index = line_number.checked_sub(1)?;
        self.document.nth(index)
    }

    /// Replaces every occurrence of `find` with `replace` on every line.
    ///
    /// Returns the number of replacements. The replacement is **not**
    /// recorded in the undo history: a later undo reverses the last insert
    /// or delete, not this call. An empty `find` changes nothing.
    pub fn find_and_replace(&mut self, find: &str, replace: &str) -> usize {
        match self.replace_all(&SearchOptions::literal(find), replace) {
            Ok(count) => count,
            Err(e) => {
                tracing::warn!("Find and replace failed: {e:#}");
                0
            }
        }
    }

    /// Replaces every match of `options` with `replace` on every line.
    ///
    /// Returns the number of replacements. Like [`Self::find_and_replace`],
    /// this is not recorded in the undo history.
    ///
    /// # Errors
    ///
    /// Returns an error if the regex pattern is invalid; the document is
    /// left untouched.
    pub fn replace_all(&mut self, options: &SearchOptions, replace: &str) -> Result<usize> {
        let Some(replacer) = LineReplacer::new(options, replace)? else {
            return Ok(0);
        };

        let mut count = 0;
        let changed_lines = self.document.map_lines(|line| {
            let (text, matches) = replacer.replace_line(line)?;
            count += matches;
            Some(text)
        });

        tracing::debug!("Replaced {count} match(es) on {changed_lines} line(s)");
        Ok(count)
    }

    /// Records `rec` and frees the entries of any records history dropped.
    fn record(&mut self, rec: EditRecord) {
        let discarded = self.history.record(rec);
        self.release_discarded(discarded);
    }

    /// Releases the entries left detached by records history dropped.
    fn release_discarded(&mut self, discarded: Discarded) {
        if discarded.is_empty() {
            return;
        }

        let mut released = 0;
        for line in discarded.detached_lines() {
            if !self.document.is_attached(line) && self.document.release(line) {
                released += 1;
            }
        }
        tracing::trace!("Released {released} detached line(s)");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor_with(lines: &[&str]) -> LineEditor {
        let mut ed = LineEditor::new();
        for line in lines {
            ed.insert(line);
        }
        ed
    }

    fn lines(ed: &LineEditor) -> Vec<&str> {
        ed.document().lines().collect()
    }

    #[test]
    fn test_insert_appends() {
        let ed = editor_with(&["A", "B", "C"]);
        assert_eq!(ed.get_text(), "A\nB\nC\n");
        assert_eq!(ed.line_count(), 3);
        assert!(ed.can_undo());
        assert!(!ed.can_redo());
    }

    #[test]
    fn test_insert_then_undo_restores_previous_state() {
        let mut ed = editor_with(&["A", "B"]);
        let before = ed.get_text();
        ed.insert("C");
        ed.undo();
        assert_eq!(ed.get_text(), before);
        assert_eq!(ed.line_count(), 2);
        assert!(ed.document().is_consistent());
    }

    #[test]
    fn test_delete_then_undo_restores_line() {
        let mut ed = editor_with(&["A", "B", "C"]);
        ed.delete_last();
        assert_eq!(ed.get_text(), "A\nB\n");
        ed.undo();
        assert_eq!(ed.get_text(), "A\nB\nC\n");
        assert!(ed.document().is_consistent());
    }

    #[test]
    fn test_undo_then_redo_replays() {
        let mut ed = editor_with(&["A", "B"]);
        ed.delete_last();
        let after_delete = ed.get_text();
        ed.undo();
        ed.redo();
        assert_eq!(ed.get_text(), after_delete);

        let after_redo = ed.get_text();
        ed.undo();
        ed.undo();
        ed.redo();
        ed.redo();
        assert_eq!(ed.get_text(), after_redo);
        assert!(ed.document().is_consistent());
    }

    #[test]
    fn test_scenario_insert_undo_redo_delete() {
        let mut ed = editor_with(&["A", "B", "C"]);
        assert_eq!(ed.get_text(), "A\nB\nC\n");
        ed.undo();
        assert_eq!(ed.get_text(), "A\nB\n");
        ed.undo();
        assert_eq!(ed.get_text(), "A\n");
        ed.redo();
        assert_eq!(ed.get_text(), "A\nB\n");
        ed.delete_last();
        assert_eq!(ed.get_text(), "A\n");
        assert!(!ed.can_redo());
        ed.redo();
        assert_eq!(ed.get_text(), "A\n");
    }

    #[test]
    fn test_new_insert_invalidates_redo() {
        let mut ed = editor_with(&["A", "B"]);
        ed.undo();
        assert!(ed.can_redo());
        ed.insert("X");
        assert!(!ed.can_redo());
        ed.redo();
        assert_eq!(lines(&ed), vec!["A", "X"]);
    }

    #[test]
    fn test_empty_operations_are_noops() {
        let mut ed = LineEditor::new();
        ed.undo();
        ed.redo();
        ed.delete_last();
        assert!(ed.is_empty());
        assert!(!ed.can_undo());
        assert!(!ed.can_redo());
        assert_eq!(ed.get_text(), "");
    }

    #[test]
    fn test_delete_on_empty_then_undo() {
        let mut ed = LineEditor::new();
        ed.delete_last();
        ed.undo();
        assert!(ed.is_empty());
        assert!(ed.document().is_consistent());
    }

    #[test]
    fn test_delete_last_only_line_then_undo() {
        let mut ed = editor_with(&["solo"]);
        ed.delete_last();
        assert!(ed.is_empty());
        ed.undo();
        assert_eq!(lines(&ed), vec!["solo"]);
        ed.redo();
        assert!(ed.is_empty());
        assert!(ed.document().is_consistent());
    }

    #[test]
    fn test_undo_delete_after_undone_insert_keeps_order() {
        // insert A, B; delete B; insert C; undo C; undo delete -> A, B
        let mut ed = editor_with(&["A", "B"]);
        ed.delete_last();
        ed.insert("C");
        ed.undo();
        ed.undo();
        assert_eq!(lines(&ed), vec!["A", "B"]);
        ed.redo();
        ed.redo();
        assert_eq!(lines(&ed), vec!["A", "C"]);
    }

    #[test]
    fn test_find_and_replace_is_not_undoable() {
        let mut ed = editor_with(&["a cat sat", "no cats"]);
        assert_eq!(ed.find_and_replace("cat", "dog"), 2);
        assert_eq!(lines(&ed), vec!["a dog sat", "no dogs"]);

        ed.undo();
        assert_eq!(lines(&ed), vec!["a dog sat"]);
    }

    #[test]
    fn test_find_and_replace_leaves_history_untouched() {
        let mut ed = editor_with(&["x"]);
        ed.insert("y");
        ed.undo();
        ed.find_and_replace("x", "z");
        assert!(ed.can_redo());
        assert_eq!(ed.history().undo_len(), 1);
        ed.redo();
        assert_eq!(lines(&ed), vec!["z", "y"]);
    }

    #[test]
    fn test_find_and_replace_empty_query() {
        let mut ed = editor_with(&["abc"]);
        assert_eq!(ed.find_and_replace("", "x"), 0);
        assert_eq!(lines(&ed), vec!["abc"]);
    }

    #[test]
    fn test_replace_all_invalid_regex_leaves_document() {
        let mut ed = editor_with(&["abc"]);
        let opts = SearchOptions {
            query: "(".to_string(),
            use_regex: true,
            ..Default::default()
        };
        assert!(ed.replace_all(&opts, "x").is_err());
        assert_eq!(lines(&ed), vec!["abc"]);
    }

    #[test]
    fn test_count_words_and_sentences() {
        let ed = editor_with(&["the quick  brown", "", "  fox\tjumps "]);
        assert_eq!(ed.count_words(), 5);
        assert_eq!(ed.count_sentences(), 3);
    }

    #[test]
    fn test_go_to_line() {
        let ed = editor_with(&["one", "two"]);
        assert_eq!(ed.go_to_line(1), Some("one"));
        assert_eq!(ed.go_to_line(2), Some("two"));
        assert_eq!(ed.go_to_line(0), None);
        assert_eq!(ed.go_to_line(3), None);
    }

    #[test]
    fn test_go_to_line_zero_is_not_first_line() {
        let ed = editor_with(&["only"]);
        assert_eq!(ed.go_to_line(0), None);
        assert_eq!(ed.go_to_line(1), Some("only"));
        assert_eq!(LineEditor::new().go_to_line(1), None);
    }

    #[test]
    fn test_display_to_writes_lines() {
        let ed = editor_with(&["a", "b"]);
        let mut out = Vec::new();
        ed.display_to(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "a\nb\n");
    }

    #[test]
    fn test_clear_empties_document_and_history() {
        let mut ed = editor_with(&["a", "b"]);
        ed.undo();
        ed.clear();
        assert!(ed.is_empty());
        assert!(!ed.can_undo());
        assert!(!ed.can_redo());
        assert_eq!(ed.document().entry_count(), 0);
    }

    #[test]
    fn test_set_text_inserts_each_line() {
        let mut ed = editor_with(&["old"]);
        ed.set_text("one\ntwo\r\nthree\n");
        assert_eq!(lines(&ed), vec!["one", "two", "three"]);
        assert_eq!(ed.history().undo_len(), 3);
        ed.undo();
        assert_eq!(lines(&ed), vec!["one", "two"]);
    }

    #[test]
    fn test_redo_invalidation_releases_detached_lines() {
        let mut ed = editor_with(&["a", "b", "c"]);
        ed.undo();
        ed.undo();
        assert_eq!(ed.document().entry_count(), 3);
        ed.insert("d");
        // "b" and "c" are gone for good; their slots are reused or freed
        assert_eq!(ed.document().entry_count(), ed.line_count());
        assert_eq!(lines(&ed), vec!["a", "d"]);
        assert!(ed.document().is_consistent());
    }

    #[test]
    fn test_redo_invalidation_keeps_line_restored_by_undo() {
        let mut ed = editor_with(&["a"]);
        ed.delete_last();
        ed.undo();
        // Deleted(a) sits on the redo stack while "a" is live again
        ed.insert("b");
        assert_eq!(lines(&ed), vec!["a", "b"]);
        assert_eq!(ed.document().entry_count(), 2);
        ed.undo();
        ed.undo();
        assert!(ed.is_empty());
        assert!(ed.document().is_consistent());
    }

    #[test]
    fn test_eviction_keeps_entry_still_referenced() {
        let mut ed = LineEditor::with_config(HistoryConfig::with_depth(1));
        ed.insert("a");
        ed.delete_last();
        // Inserted(a) was evicted while Deleted(a) still holds the entry
        ed.undo();
        assert_eq!(lines(&ed), vec!["a"]);
        assert!(ed.document().is_consistent());
    }

    #[test]
    fn test_eviction_releases_unreferenced_delete() {
        let mut ed = LineEditor::with_config(HistoryConfig::with_depth(1));
        ed.insert("a");
        ed.insert("b");
        ed.delete_last();
        ed.insert("c");
        // Deleted(b) evicted; "b" is unreachable
        assert_eq!(ed.document().entry_count(), 2);
        assert_eq!(lines(&ed), vec!["a", "c"]);
    }

    #[test]
    fn test_depth_limit_caps_undo() {
        let mut ed = LineEditor::with_config(HistoryConfig::with_depth(2));
        for line in ["a", "b", "c", "d"] {
            ed.insert(line);
        }
        ed.undo();
        ed.undo();
        ed.undo();
        assert_eq!(lines(&ed), vec!["a", "b"]);
    }
}

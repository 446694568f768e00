//! File I/O for the editor.
//!
//! Loading text from disk and writing the current lines back out.

use std::path::Path;

use anyhow::{Context, Result};

use crate::history::HistoryConfig;

use super::LineEditor;

impl LineEditor {
    /// Opens a text file, one line per stored line.
    ///
    /// The loaded lines are not recorded in the undo history, so undo never
    /// walks back past the file's initial content.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or isn't valid UTF-8.
    pub fn open(path: &Path, config: HistoryConfig) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read file: {}", path.display()))?;

        let mut editor = Self::with_config(config);
        editor.history.pause_recording();
        for line in text.lines() {
            editor.insert(line);
        }
        editor.history.resume_recording();

        tracing::debug!("Opened {} ({} lines)", path.display(), editor.line_count());
        Ok(editor)
    }

    /// Writes every line to `path`, each followed by a line break.
    ///
    /// The document and history are untouched whether or not the write
    /// succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.get_text())
            .with_context(|| format!("failed to write file: {}", path.display()))?;
        tracing::debug!("Saved {} lines to {}", self.line_count(), path.display());
        Ok(())
    }
}

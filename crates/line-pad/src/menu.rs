/// Numbered console menu driving a `LineEditor`.
use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use line_pad_config::AppConfig;
use line_pad_core::LineEditor;

/// One entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// Append a sentence.
    Insert,
    /// Delete the last sentence.
    DeleteLast,
    /// Undo the last edit.
    Undo,
    /// Redo the last undone edit.
    Redo,
    /// Print every line.
    Display,
    /// Save the text to a file.
    Save,
    /// Replace text on every line.
    FindAndReplace,
    /// Print the number of lines.
    CountSentences,
    /// Drop all text and history.
    Clear,
    /// Print the number of words.
    CountWords,
    /// Print one line by number.
    GoToLine,
    /// Leave the editor.
    Exit,
}

impl MenuChoice {
    /// Parses the number typed at the menu prompt.
    pub fn parse(input: &str) -> Option<Self> {
        let choice = match input.trim().parse::<u32>().ok()? {
            1 => Self::Insert,
            2 => Self::DeleteLast,
            3 => Self::Undo,
            4 => Self::Redo,
            5 => Self::Display,
            6 => Self::Save,
            7 => Self::FindAndReplace,
            8 => Self::CountSentences,
            9 => Self::Clear,
            10 => Self::CountWords,
            11 => Self::GoToLine,
            12 => Self::Exit,
            _ => return None,
        };
        Some(choice)
    }
}

const MENU: &str = "\n==================== Line Pad ====================\n\
1. Insert Sentence\n\
2. Delete Last Sentence\n\
3. Undo\n\
4. Redo\n\
5. Display Text\n\
6. Save Text to File\n\
7. Find and Replace\n\
8. Count Sentences\n\
9. Clear Text\n\
10. Count Words\n\
11. Go to Line\n\
12. Exit\n\
==================================================\n";

/// An interactive editing session.
#[derive(Debug)]
pub struct Session {
    /// The text being edited.
    pub editor: LineEditor,
    /// Settings used for saving; updated with the last saved file.
    pub config: AppConfig,
}

impl Session {
    /// Creates a session over `editor` using `config`.
    pub fn new(editor: LineEditor, config: AppConfig) -> Self {
        Self { editor, config }
    }

    /// Runs the menu loop until the user exits or `input` reaches EOF.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading `input` or writing `output` fails.
    /// Editing failures are reported to the user and the loop continues.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> Result<()> {
        if self.config.show_welcome_banner {
            writeln!(output, "==================================================")?;
            writeln!(output, "              Welcome To Line Pad!")?;
            writeln!(output, "==================================================")?;
        }

        loop {
            write!(output, "{MENU}Enter your choice: ")?;
            output.flush()?;
            let Some(line) = read_line(&mut input)? else {
                tracing::debug!("Input closed, leaving menu");
                break;
            };

            let Some(choice) = MenuChoice::parse(&line) else {
                writeln!(output, "Invalid choice. Please try again.")?;
                continue;
            };
            tracing::trace!("Menu choice: {choice:?}");

            if choice == MenuChoice::Exit {
                writeln!(output, "Exiting editor.")?;
                break;
            }
            if !self.handle(choice, &mut input, &mut output)? {
                break;
            }
        }
        Ok(())
    }

    /// Executes one menu action. Returns false if input ran out mid-action.
    fn handle<R: BufRead, W: Write>(
        &mut self,
        choice: MenuChoice,
        input: &mut R,
        output: &mut W,
    ) -> Result<bool> {
        match choice {
            MenuChoice::Insert => {
                let Some(text) = prompt(input, output, "Enter sentence to insert: ")? else {
                    return Ok(false);
                };
                self.editor.insert(&text);
            }
            MenuChoice::DeleteLast => {
                if self.editor.is_empty() {
                    writeln!(output, "Nothing to delete.")?;
                }
                self.editor.delete_last();
            }
            MenuChoice::Undo => {
                if !self.editor.can_undo() {
                    writeln!(output, "Nothing to undo.")?;
                }
                self.editor.undo();
            }
            MenuChoice::Redo => {
                if !self.editor.can_redo() {
                    writeln!(output, "Nothing to redo.")?;
                }
                self.editor.redo();
            }
            MenuChoice::Display => {
                self.editor
                    .display_to(output)
                    .context("failed to display text")?;
            }
            MenuChoice::Save => {
                let Some(name) = prompt(input, output, "Enter filename to save: ")? else {
                    return Ok(false);
                };
                self.save(name.trim(), output)?;
            }
            MenuChoice::FindAndReplace => {
                let Some(find) = prompt(input, output, "Enter text to find: ")? else {
                    return Ok(false);
                };
                let Some(replace) = prompt(input, output, "Enter text to replace with: ")? else {
                    return Ok(false);
                };
                let count = self.editor.find_and_replace(&find, &replace);
                writeln!(output, "Replaced {count} occurrence(s).")?;
            }
            MenuChoice::CountSentences => {
                writeln!(
                    output,
                    "Total number of sentences: {}",
                    self.editor.count_sentences()
                )?;
            }
            MenuChoice::Clear => {
                self.editor.clear();
                writeln!(output, "Text cleared.")?;
            }
            MenuChoice::CountWords => {
                writeln!(output, "Total number of words: {}", self.editor.count_words())?;
            }
            MenuChoice::GoToLine => {
                let Some(raw) = prompt(input, output, "Enter line number to go to: ")? else {
                    return Ok(false);
                };
                let found = raw
                    .trim()
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| self.editor.go_to_line(n).map(|text| (n, text)));
                match found {
                    Some((n, text)) => writeln!(output, "Line {n}: {text}")?,
                    None => writeln!(output, "Line number out of range.")?,
                }
            }
            MenuChoice::Exit => {}
        }
        Ok(true)
    }

    /// Saves to `name`, falling back to the last saved file when `name` is empty.
    fn save<W: Write>(&mut self, name: &str, output: &mut W) -> Result<()> {
        let name = if name.is_empty() {
            self.config.last_saved_file.clone()
        } else {
            name.to_string()
        };
        if name.is_empty() {
            writeln!(output, "No filename given.")?;
            return Ok(());
        }

        let path = self.config.resolve_save_path(&name);
        match self.editor.save_to_file(&path) {
            Ok(()) => {
                self.config.remember_saved_file(&path);
                writeln!(output, "Text saved to file: {}", path.display())?;
            }
            Err(e) => {
                tracing::warn!("Save failed: {e:#}");
                writeln!(output, "Error: Unable to open file for writing.")?;
            }
        }
        Ok(())
    }
}

/// Writes `message` and reads the reply. `None` on EOF.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
) -> Result<Option<String>> {
    write!(output, "{message}")?;
    output.flush()?;
    read_line(input)
}

/// Reads one line without its line terminator. `None` on EOF.
fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .context("failed to read from input")?;
    if read == 0 {
        return Ok(None);
    }
    let trimmed = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed);
    Ok(Some(line))
}

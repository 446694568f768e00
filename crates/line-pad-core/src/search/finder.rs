/// Plain text and regex replacement over single lines.
use anyhow::{Context, Result};
use regex::{NoExpand, Regex};

/// Search configuration options.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// The search query string.
    pub query: String,
    /// Whether to use regex search.
    pub use_regex: bool,
    /// Whether search is case-sensitive.
    pub case_sensitive: bool,
    /// Whether to match whole words only.
    pub whole_word: bool,
}

impl SearchOptions {
    /// Exact, case-sensitive match of `query`.
    pub fn literal(query: &str) -> Self {
        Self {
            query: query.to_string(),
            case_sensitive: true,
            ..Default::default()
        }
    }
}

/// Compiled find-and-replace rule applied one line at a time.
///
/// Matches never span lines and are replaced left to right without overlap.
/// In regex mode `$1`-style references in the replacement are expanded; in
/// plain mode the replacement is inserted verbatim.
#[derive(Debug, Clone)]
pub struct LineReplacer {
    regex: Regex,
    replacement: String,
    expand: bool,
}

impl LineReplacer {
    /// Compiles the rule. Returns `Ok(None)` for an empty query.
    ///
    /// # Errors
    ///
    /// Returns an error if the regex pattern is invalid.
    pub fn new(options: &SearchOptions, replacement: &str) -> Result<Option<Self>> {
        if options.query.is_empty() {
            return Ok(None);
        }
        Ok(Some(Self {
            regex: build_pattern(options)?,
            replacement: replacement.to_string(),
            expand: options.use_regex,
        }))
    }

    /// Replaces every match in `line`.
    ///
    /// Returns the rewritten line and the number of matches, or `None` if
    /// nothing matched.
    pub fn replace_line(&self, line: &str) -> Option<(String, usize)> {
        let count = self.regex.find_iter(line).count();
        if count == 0 {
            return None;
        }
        let replaced = if self.expand {
            self.regex.replace_all(line, self.replacement.as_str())
        } else {
            self.regex.replace_all(line, NoExpand(&self.replacement))
        };
        Some((replaced.into_owned(), count))
    }
}

/// Builds a regex pattern from the search options.
fn build_pattern(options: &SearchOptions) -> Result<Regex> {
    let mut pattern = if options.use_regex {
        options.query.clone()
    } else {
        regex::escape(&options.query)
    };

    if options.whole_word {
        pattern = format!(r"\b(?:{pattern})\b");
    }

    let regex = if options.case_sensitive {
        Regex::new(&pattern)
    } else {
        Regex::new(&format!("(?i){pattern}"))
    };

    regex.context("invalid search pattern")
}

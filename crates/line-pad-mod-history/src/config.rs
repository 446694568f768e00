/// Configuration for the history system.
use line_pad_config::AppConfig;

/// Maximum number of undo records kept per document.
/// Oldest records are evicted when this limit is exceeded.
pub const DEFAULT_MAX_HISTORY_DEPTH: usize = 10_000;

/// Configuration for the history system.
#[derive(Debug, Clone)]
pub struct HistoryConfig {
    /// Max undo records per document. Always at least 1.
    pub max_history_depth: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_history_depth: DEFAULT_MAX_HISTORY_DEPTH,
        }
    }
}

impl HistoryConfig {
    /// Creates a config with the given depth, clamped to at least 1.
    pub fn with_depth(max_history_depth: usize) -> Self {
        Self {
            max_history_depth: max_history_depth.max(1),
        }
    }
}

impl From<&AppConfig> for HistoryConfig {
    fn from(config: &AppConfig) -> Self {
        Self::with_depth(config.max_history_depth)
    }
}

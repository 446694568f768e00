/// Application configuration: load, save, and sanitize.
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// File name of the configuration file.
pub const CONFIG_FILE_NAME: &str = "line-pad.json";

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Max undo steps kept per document (minimum 1).
    pub max_history_depth: usize,
    pub show_welcome_banner: bool,
    /// Folder that relative save paths are resolved against. Empty = user's home directory.
    pub default_work_folder: String,
    /// Whether to remember the last file saved to.
    pub remember_last_file: bool,
    /// Last file written by "Save Text to File" (persisted across sessions).
    pub last_saved_file: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_history_depth: 10_000,
            show_welcome_banner: true,
            default_work_folder: String::new(),
            remember_last_file: true,
            last_saved_file: String::new(),
        }
    }
}

impl AppConfig {
    /// Returns the config file path: exe directory + `line-pad.json`.
    pub fn config_path() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|d| d.join(CONFIG_FILE_NAME)))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
    }

    /// Loads config from `path`, creating a default file if it doesn't exist.
    /// Returns defaults on any error (missing file, parse error, etc.).
    pub fn load_or_create(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(contents) => match serde_json::from_str::<AppConfig>(&contents) {
                    Ok(mut config) => {
                        config.sanitize();
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {}: {e}", path.display());
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {}: {e}", path.display());
                }
            }
            // Return defaults on error (don't overwrite broken file)
            let mut config = Self::default();
            config.sanitize();
            config
        } else {
            let config = Self::default();
            if let Err(e) = config.save(path) {
                tracing::warn!("Failed to create default config at {}: {e:#}", path.display());
            }
            config
        }
    }

    /// Saves config to `path` as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize config")?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write config: {}", path.display()))
    }

    /// Returns the folder relative save paths are resolved against.
    ///
    /// Resolution order:
    /// 1. `default_work_folder` (if non-empty and the path exists)
    /// 2. User's home directory
    pub fn resolve_work_folder(&self) -> Option<PathBuf> {
        if !self.default_work_folder.is_empty() {
            let p = PathBuf::from(&self.default_work_folder);
            if p.is_dir() {
                return Some(p);
            }
        }
        dirs::home_dir()
    }

    /// Resolves a user-supplied file name to a full path.
    ///
    /// Absolute paths are returned unchanged; relative ones are joined onto
    /// [`Self::resolve_work_folder`], or left relative if no folder resolves.
    pub fn resolve_save_path(&self, name: &str) -> PathBuf {
        let path = PathBuf::from(name);
        if path.is_absolute() {
            return path;
        }
        match self.resolve_work_folder() {
            Some(folder) => folder.join(path),
            None => path,
        }
    }

    /// Remembers `path` as the last saved file, if enabled.
    pub fn remember_saved_file(&mut self, path: &Path) {
        if self.remember_last_file {
            self.last_saved_file = path.to_string_lossy().into_owned();
        }
    }

    /// Clamps values to valid ranges and resets invalid fields.
    pub fn sanitize(&mut self) {
        self.max_history_depth = self.max_history_depth.max(1);
        if !self.remember_last_file {
            self.last_saved_file.clear();
        }
    }
}

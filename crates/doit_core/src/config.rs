//! Core configuration.
//!
//! # Responsibility
//! - Describe where the task database lives and how logging starts.
//! - Select list synchronization behavior for add and edit.
//!
//! # Invariants
//! - Every field has a default; an empty JSON object is a valid config.
//! - Unknown keys are rejected rather than silently ignored.
//! - Defaults reproduce the reload-based list behavior.

use crate::logging::default_log_level;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Default database file name, relative to the working directory.
pub const DEFAULT_DB_FILE_NAME: &str = "doit.sqlite3";

/// How the list controller reflects a newly added task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddSync {
    /// Rebuild the whole list from the store (emits `Reset`).
    #[default]
    Reload,
    /// Insert the new task at the front (emits `InsertedAt(0)`).
    Incremental,
}

/// How the list controller reflects an edited task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditSync {
    /// Leave in-memory text stale until the caller reloads.
    #[default]
    Reload,
    /// Patch in-memory text immediately (emits `UpdatedAt(index)`).
    Patch,
}

/// List synchronization options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListOptions {
    pub add_sync: AddSync,
    pub edit_sync: EditSync,
}

/// Top-level configuration for a to-do session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoreConfig {
    /// SQLite database file.
    pub db_path: PathBuf,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Absolute directory for rolling logs. `None` disables file logging.
    pub log_dir: Option<PathBuf>,
    pub list: ListOptions,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
            list: ListOptions::default(),
        }
    }
}

/// Errors from loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(serde_json::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
        }
    }
}

impl CoreConfig {
    /// Parses a JSON document; missing fields fall back to defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(ConfigError::Parse)
    }

    /// Reads and parses a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }
}

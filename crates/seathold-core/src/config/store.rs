//! Seat document persistence configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Which document gateway backs the seat store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreProvider {
    /// A JSON document on the local filesystem.
    #[default]
    JsonFile,
    /// A process-local document, lost on restart.
    Memory,
}

impl std::fmt::Display for StoreProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreProvider::JsonFile => write!(f, "json_file"),
            StoreProvider::Memory => write!(f, "memory"),
        }
    }
}

/// Seat document persistence configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Gateway implementation.
    #[serde(default)]
    pub provider: StoreProvider,
    /// Path of the JSON document (`json_file` provider only).
    #[serde(default = "default_path")]
    pub path: String,
    /// Write the document indented.
    #[serde(default = "default_true")]
    pub pretty: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            provider: StoreProvider::default(),
            path: default_path(),
            pretty: true,
        }
    }
}

impl StoreConfig {
    /// Reject settings the selected provider cannot work with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.provider == StoreProvider::JsonFile && self.path.trim().is_empty() {
            return Err(AppError::configuration(
                "store.path is required for the json_file provider",
            ));
        }
        Ok(())
    }
}

fn default_path() -> String {
    "data/db.integrated.json".to_string()
}

fn default_true() -> bool {
    true
}

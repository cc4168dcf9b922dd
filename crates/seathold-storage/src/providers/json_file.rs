//! JSON file document gateway.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, info};

use seathold_core::error::{AppError, ErrorKind};
use seathold_core::result::AppResult;
use seathold_entity::SeatDocument;

use crate::gateway::DocumentGateway;

/// Stores the seat document as a single JSON file.
///
/// Saves go to a sibling temporary file which is then renamed over the
/// target, so a crash mid-write never leaves a truncated document.
#[derive(Debug, Clone)]
pub struct JsonFileGateway {
    /// Path of the document.
    path: PathBuf,
    /// Indent the written JSON.
    pretty: bool,
}

impl JsonFileGateway {
    /// Open (or create) the document at `path`.
    ///
    /// A missing file is created holding an empty seat collection. An
    /// existing file without a `seats` key gets one on the next save.
    pub async fn new(path: impl Into<PathBuf>, pretty: bool) -> AppResult<Self> {
        let path = path.into();
        let gateway = Self { path, pretty };

        gateway.ensure_parent(&gateway.path).await?;

        if fs::try_exists(&gateway.path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to stat document: {}", gateway.path.display()),
                e,
            )
        })? {
            debug!(path = %gateway.path.display(), "Using existing seat document");
        } else {
            gateway.save(&SeatDocument::default()).await?;
            info!(path = %gateway.path.display(), "Created empty seat document");
        }

        Ok(gateway)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Ensure the parent directory of a path exists.
    async fn ensure_parent(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create parent directory: {}", parent.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentGateway for JsonFileGateway {
    fn provider_type(&self) -> &str {
        "json_file"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(fs::try_exists(&self.path).await.unwrap_or(false))
    }

    async fn load(&self) -> AppResult<SeatDocument> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Seat document missing, starting empty");
                return Ok(SeatDocument::default());
            }
            Err(e) => {
                return Err(AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to read document: {}", self.path.display()),
                    e,
                ));
            }
        };

        if raw.trim().is_empty() {
            return Ok(SeatDocument::default());
        }

        let document: SeatDocument = serde_json::from_str(&raw).map_err(|e| {
            AppError::with_source(
                ErrorKind::Serialization,
                format!("Malformed seat document: {}", self.path.display()),
                e,
            )
        })?;

        debug!(path = %self.path.display(), seats = document.seats.len(), "Loaded seat document");
        Ok(document)
    }

    async fn save(&self, document: &SeatDocument) -> AppResult<()> {
        let body = if self.pretty {
            serde_json::to_vec_pretty(document)?
        } else {
            serde_json::to_vec(document)?
        };

        let temp = self.temp_path();
        fs::write(&temp, &body).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write document: {}", temp.display()),
                e,
            )
        })?;

        fs::rename(&temp, &self.path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to replace document: {}", self.path.display()),
                e,
            )
        })?;

        debug!(path = %self.path.display(), bytes = body.len(), "Saved seat document");
        Ok(())
    }
}

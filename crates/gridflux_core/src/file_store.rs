//! File-backed column configuration persistence.

use crate::{ConfigPersistence, FieldSchema, GridError};
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};

/// `ConfigPersistence` over a JSON file.
///
/// A missing file reads as nothing stored. A file that no longer parses is
/// renamed to a timestamped `.corrupt-…` backup and likewise reads as
/// nothing stored, so the caller starts over from the defaults instead of
/// failing to open.
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    /// Store under the platform config directory
    /// (`<config_dir>/gridflux/columns.json`), creating the directory if
    /// needed.
    pub fn new() -> Result<Self, GridError> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            GridError::IoError(std::io::Error::other("Could not find config directory"))
        })?;

        let app_dir = config_dir.join("gridflux");
        fs::create_dir_all(&app_dir)?;

        Ok(Self {
            path: app_dir.join("columns.json"),
        })
    }

    pub fn from_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigPersistence for FileConfigStore {
    fn load(&self) -> Result<Vec<FieldSchema>, GridError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)?;
        match serde_json::from_str(&content) {
            Ok(fields) => Ok(fields),
            Err(err) => {
                let backup_path = self
                    .path
                    .with_extension(format!("corrupt-{}", Utc::now().format("%Y%m%d%H%M%S")));

                if let Err(rename_err) = fs::rename(&self.path, &backup_path) {
                    log::warn!(
                        "Failed to back up corrupted column configuration: {} (original parse error: {})",
                        rename_err,
                        err
                    );
                } else {
                    log::warn!(
                        "Column configuration was corrupted. Backup created at {:?}: {}",
                        backup_path,
                        err
                    );
                }

                Ok(Vec::new())
            }
        }
    }

    fn persist(&self, fields: &[FieldSchema]) -> Result<(), GridError> {
        let content = serde_json::to_string_pretty(fields)
            .map_err(|e| GridError::Persistence(e.to_string()))?;

        fs::write(&self.path, content)?;
        Ok(())
    }
}

//! JSON data-file persistence for the owner→zone map.
//!
//! One whole-object blob per process: loaded once at startup, rewritten
//! after every mutating registry operation. No incremental or append format.

use forestry_types::{PlayerId, StructureId, ZoneId};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Persisted shape of the registry: owner id → insertion-ordered
/// `[structure, zone]` pairs. The array (not a JSON object) carries the
/// insertion order the eviction policy depends on.
pub type OwnerZoneMap = HashMap<PlayerId, Vec<(StructureId, ZoneId)>>;

/// Result type for persistence operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur loading or saving the data file.
#[derive(Debug, Error)]
pub enum StorageError {
    /// IO error (file system).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Whole-object JSON blob at a fixed path.
#[derive(Debug, Clone)]
pub struct DataFile {
    path: PathBuf,
}

impl DataFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the persisted map; a missing file is an empty map.
    pub fn load(&self) -> StorageResult<OwnerZoneMap> {
        if !self.path.exists() {
            debug!("no data file at {:?}, starting empty", self.path);
            return Ok(OwnerZoneMap::new());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Replaces the persisted map wholesale.
    pub fn save(&self, map: &OwnerZoneMap) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(map)?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }
}

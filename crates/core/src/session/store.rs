//! On-disk session cache.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::{error::StoreError, models::SessionInfo};

/// Reads and writes the cached [`SessionInfo`] record as JSON.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Create a store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the cache file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the cached session.
    ///
    /// Absent, unreadable, malformed or incomplete files are all reported as
    /// [`StoreError::NotFound`].
    pub fn load(&self) -> Result<SessionInfo, StoreError> {
        debug!("reading cached session from {}", self.path.display());
        let not_found = |reason: String| StoreError::NotFound {
            path: self.path.clone(),
            reason,
        };

        let content = fs::read_to_string(&self.path).map_err(|err| not_found(err.to_string()))?;
        let session: SessionInfo =
            serde_json::from_str(&content).map_err(|err| not_found(err.to_string()))?;
        if !session.is_complete() {
            return Err(not_found("record is incomplete".to_string()));
        }
        Ok(session)
    }

    /// Replace the cached session.
    ///
    /// The record is written to a temporary file next to the cache and renamed
    /// over it, so readers never observe a partially written file.
    pub fn save(&self, session: &SessionInfo) -> Result<(), StoreError> {
        debug!("writing session to {}", self.path.display());
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        if !session.is_complete() {
            return Err(write_err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "refusing to cache an incomplete session",
            )));
        }

        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(write_err)?;

        let serialized = serde_json::to_vec(session)
            .map_err(io::Error::from)
            .map_err(write_err)?;
        let mut file = NamedTempFile::new_in(parent).map_err(write_err)?;
        file.write_all(&serialized).map_err(write_err)?;
        file.persist(&self.path).map_err(|err| write_err(err.error))?;
        Ok(())
    }
}

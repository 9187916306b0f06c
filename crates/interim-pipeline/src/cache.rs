//! On-disk snapshot of the last good filtered result.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use interim_core::Snapshot;

use crate::error::CacheError;

/// A single JSON snapshot file.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored snapshot.
    ///
    /// Returns `Ok(None)` when no snapshot file exists yet.
    ///
    /// # Errors
    ///
    /// - [`CacheError::Io`] if the file exists but cannot be read.
    /// - [`CacheError::Json`] if it does not hold a valid snapshot.
    pub fn load(&self) -> Result<Option<Snapshot>, CacheError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(CacheError::Io {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| CacheError::Json {
                path: self.path.clone(),
                source: e,
            })
    }

    /// Writes `snapshot`, replacing any previous one.
    ///
    /// The JSON goes to a temporary sibling first and is renamed over the
    /// target, so readers never observe a partial file.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Io`] on any filesystem failure and
    /// [`CacheError::Json`] if serialization fails.
    pub fn save(&self, snapshot: &Snapshot) -> Result<(), CacheError> {
        let io_err = |source| CacheError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(snapshot).map_err(|e| CacheError::Json {
            path: self.path.clone(),
            source: e,
        })?;

        let tmp = self.tmp_path();
        fs::write(&tmp, json).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)?;
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

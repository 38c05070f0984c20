//! JSON file store backend
//!
//! The whole collection lives in one JSON document. Every save writes a
//! temporary file next to the target, syncs it, then renames it over the
//! target, so a crash mid-write leaves the previous document intact.

use crate::store::traits::{decode_document, encode_document, StateBackend, StoreError, StoreResult};
use crate::store::UrlSet;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// File-backed store persistence
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory the temp file must live in for the rename to stay atomic
    fn parent_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

impl StateBackend for JsonFileBackend {
    fn load(&self) -> StoreResult<Option<Vec<UrlSet>>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(StoreError::CorruptState {
                    origin: self.describe(),
                    message: err.to_string(),
                })
            }
        };

        decode_document(&content, &self.describe()).map(Some)
    }

    fn save(&self, sets: &[UrlSet]) -> StoreResult<()> {
        let content = encode_document(sets)?;

        let dir = self.parent_dir();
        fs::create_dir_all(&dir)?;

        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;
        tmp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;

        tracing::debug!("Persisted {} URL sets to {}", sets.len(), self.path.display());
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

//! Store backend trait and error types
//!
//! This module defines the interface the URL store persists through, the
//! persisted document layout, and the associated error types.

use crate::store::UrlSet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Which kind of index a caller got wrong
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    Set,
    Column,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Set => write!(f, "set"),
            Self::Column => write!(f, "column"),
        }
    }
}

/// Errors that can occur during store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{kind} index {index} out of range (limit {limit})")]
    IndexOutOfRange {
        kind: IndexKind,
        index: i64,
        limit: usize,
    },

    #[error("Persisted state at {origin} is corrupt: {message}")]
    CorruptState { origin: String, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Durable storage for the whole collection of URL sets
///
/// The store hands over the complete collection on every save; backends
/// rewrite their copy entirely and never append.
pub trait StateBackend: Send + Sync {
    /// Reads the persisted collection
    ///
    /// # Returns
    ///
    /// * `Ok(None)` - Nothing has been persisted yet
    /// * `Ok(Some(sets))` - The persisted collection
    /// * `Err(StoreError::CorruptState)` - Persisted data exists but is unreadable
    fn load(&self) -> StoreResult<Option<Vec<UrlSet>>>;

    /// Replaces the persisted collection with `sets`
    fn save(&self, sets: &[UrlSet]) -> StoreResult<()>;

    /// Human-readable location, used in logs and errors
    fn describe(&self) -> String;
}

/// On-disk layout: `{ "saved_at": ..., "sets": [ { "name", "urls" } ] }`
#[derive(Debug, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(default)]
    saved_at: Option<DateTime<Utc>>,
    sets: Vec<UrlSet>,
}

/// Serializes the collection into the persisted document format
pub fn encode_document(sets: &[UrlSet]) -> StoreResult<String> {
    let document = StoreDocument {
        saved_at: Some(Utc::now()),
        sets: sets.to_vec(),
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Parses a persisted document; any failure is reported as corrupt state
pub fn decode_document(content: &str, origin: &str) -> StoreResult<Vec<UrlSet>> {
    serde_json::from_str::<StoreDocument>(content)
        .map(|document| document.sets)
        .map_err(|e| StoreError::CorruptState {
            origin: origin.to_string(),
            message: e.to_string(),
        })
}

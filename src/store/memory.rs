//! In-memory store backend
//!
//! Holds the serialized document rather than the sets themselves, so a
//! reload goes through the same encode/decode path as the file backend.

use crate::store::traits::{decode_document, encode_document, StateBackend, StoreResult};
use crate::store::UrlSet;
use std::sync::{Arc, Mutex, PoisonError};

/// Volatile backend, shareable between several stores
///
/// Clones share the same document, which lets a test build a second
/// [`Store`](crate::store::Store) over what the first one persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    document: Arc<Mutex<Option<String>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing serialized document
    pub fn with_document(document: impl Into<String>) -> Self {
        Self {
            document: Arc::new(Mutex::new(Some(document.into()))),
        }
    }

    /// The last persisted document, if any
    pub fn document(&self) -> Option<String> {
        self.document
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl StateBackend for MemoryBackend {
    fn load(&self) -> StoreResult<Option<Vec<UrlSet>>> {
        match self.document() {
            Some(text) => decode_document(&text, &self.describe()).map(Some),
            None => Ok(None),
        }
    }

    fn save(&self, sets: &[UrlSet]) -> StoreResult<()> {
        let text = encode_document(sets)?;
        *self.document.lock().unwrap_or_else(PoisonError::into_inner) = Some(text);
        Ok(())
    }

    fn describe(&self) -> String {
        "<memory>".to_string()
    }
}

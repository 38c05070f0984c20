//! Multi-set URL store
//!
//! This module holds every saved URL set, including:
//! - Positional (column) slot reads and writes
//! - Set creation, renaming and slot deletion
//! - Write-through persistence through a [`StateBackend`]
//!
//! All access goes through one mutex. A mutation is applied to a copy, the
//! copy is persisted, and only then does it replace the in-memory state, so
//! readers never see a state that failed to reach durable storage.

mod json_file;
mod memory;
mod traits;
mod url_set;

pub use json_file::JsonFileBackend;
pub use memory::MemoryBackend;
pub use traits::{
    decode_document, encode_document, IndexKind, StateBackend, StoreError, StoreResult,
};
pub use url_set::{Slot, UrlSet};

use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Highest number of columns a single set may grow to
pub const MAX_COLUMNS: usize = 256;

/// Converts a wire index into a store index, rejecting negatives
///
/// # Example
///
/// ```
/// use column_scout::store::{checked_index, IndexKind};
///
/// assert_eq!(checked_index(2, IndexKind::Set).unwrap(), 2);
/// assert!(checked_index(-1, IndexKind::Column).is_err());
/// ```
pub fn checked_index(raw: i64, kind: IndexKind) -> StoreResult<usize> {
    usize::try_from(raw).map_err(|_| StoreError::IndexOutOfRange {
        kind,
        index: raw,
        limit: 0,
    })
}

fn out_of_range(kind: IndexKind, index: usize, limit: usize) -> StoreError {
    StoreError::IndexOutOfRange {
        kind,
        index: i64::try_from(index).unwrap_or(i64::MAX),
        limit,
    }
}

/// The shared collection of URL sets
pub struct Store {
    sets: Mutex<Vec<UrlSet>>,
    backend: Box<dyn StateBackend>,
}

impl Store {
    /// Loads the persisted sets from `backend`
    ///
    /// With nothing persisted yet (or an empty collection) the store starts
    /// with a single empty, unnamed set.
    ///
    /// # Returns
    ///
    /// * `Ok(Store)` - Store ready for use
    /// * `Err(StoreError::CorruptState)` - Persisted data could not be read;
    ///   callers are expected to refuse to start rather than discard it
    pub fn load(backend: impl StateBackend + 'static) -> StoreResult<Self> {
        let sets = match backend.load()? {
            Some(sets) if !sets.is_empty() => {
                tracing::info!("Loaded {} URL sets from {}", sets.len(), backend.describe());
                sets
            }
            Some(_) | None => {
                tracing::info!(
                    "No saved URL sets at {}, starting with one empty set",
                    backend.describe()
                );
                vec![UrlSet::new()]
            }
        };

        Ok(Self {
            sets: Mutex::new(sets),
            backend: Box::new(backend),
        })
    }

    /// Opens a store persisted as a JSON document at `path`
    pub fn open(path: &Path) -> StoreResult<Self> {
        Self::load(JsonFileBackend::new(path))
    }

    /// Creates a store over a fresh in-memory backend
    pub fn in_memory() -> Self {
        Self {
            sets: Mutex::new(vec![UrlSet::new()]),
            backend: Box::new(MemoryBackend::new()),
        }
    }

    /// Number of sets
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copy of every set in index order
    pub fn snapshot(&self) -> Vec<UrlSet> {
        self.lock().clone()
    }

    /// Names of all sets in index order; unnamed sets yield `""`
    pub fn url_set_names(&self) -> Vec<String> {
        self.lock().iter().map(|set| set.name().to_string()).collect()
    }

    /// Slots of the set at `set_index`
    pub fn urls(&self, set_index: usize) -> StoreResult<Vec<Slot>> {
        let sets = self.lock();
        sets.get(set_index)
            .map(|set| set.slots().to_vec())
            .ok_or_else(|| out_of_range(IndexKind::Set, set_index, sets.len()))
    }

    /// Slots of the set at `set_index`, creating it when `set_index` is the
    /// current set count
    pub fn get_or_create_url_set(&self, set_index: usize) -> StoreResult<Vec<Slot>> {
        let mut sets = self.lock();
        if let Some(set) = sets.get(set_index) {
            return Ok(set.slots().to_vec());
        }
        if set_index != sets.len() {
            return Err(out_of_range(IndexKind::Set, set_index, sets.len()));
        }

        let mut draft = sets.clone();
        draft.push(UrlSet::new());
        self.commit(&mut sets, draft)?;
        tracing::info!("Created URL set {} on first read", set_index);
        Ok(Vec::new())
    }

    /// Appends a new empty, unnamed set and returns its index
    pub fn add_new_url_set(&self) -> StoreResult<usize> {
        let index = self.mutate(|sets| {
            sets.push(UrlSet::new());
            Ok(sets.len() - 1)
        })?;
        tracing::info!("Added URL set {}", index);
        Ok(index)
    }

    /// Renames the set at `set_index`
    pub fn update_url_set_name(&self, set_index: usize, name: &str) -> StoreResult<()> {
        self.mutate(|sets| {
            let limit = sets.len();
            let set = sets
                .get_mut(set_index)
                .ok_or_else(|| out_of_range(IndexKind::Set, set_index, limit))?;
            set.rename(name);
            Ok(())
        })?;
        tracing::info!("Renamed URL set {} to {:?}", set_index, name);
        Ok(())
    }

    /// Writes `url` into column `column_index` of set `set_index`
    ///
    /// Gaps before the column become unset slots. When `set_index` equals the
    /// current set count, the set is created first.
    ///
    /// # Returns
    ///
    /// The set's slots after the write
    pub fn set_url_at(
        &self,
        set_index: usize,
        column_index: usize,
        url: &str,
    ) -> StoreResult<Vec<Slot>> {
        if column_index >= MAX_COLUMNS {
            return Err(out_of_range(IndexKind::Column, column_index, MAX_COLUMNS));
        }

        let slots = self.mutate(|sets| {
            if set_index == sets.len() {
                sets.push(UrlSet::new());
            }
            let limit = sets.len();
            let set = sets
                .get_mut(set_index)
                .ok_or_else(|| out_of_range(IndexKind::Set, set_index, limit))?;
            set.set_url_at(column_index, url);
            Ok(set.slots().to_vec())
        })?;

        tracing::info!("Set URL at set {} column {}: {}", set_index, column_index, url);
        Ok(slots)
    }

    /// Removes column `column_index` of set `set_index`, shifting later
    /// columns left
    ///
    /// # Returns
    ///
    /// The set's slots after the removal
    pub fn delete_url_at(&self, set_index: usize, column_index: usize) -> StoreResult<Vec<Slot>> {
        let slots = self.mutate(|sets| {
            let limit = sets.len();
            let set = sets
                .get_mut(set_index)
                .ok_or_else(|| out_of_range(IndexKind::Set, set_index, limit))?;
            let columns = set.len();
            set.remove_slot(column_index)
                .ok_or_else(|| out_of_range(IndexKind::Column, column_index, columns))?;
            Ok(set.slots().to_vec())
        })?;

        tracing::info!("Deleted column {} of set {}", column_index, set_index);
        Ok(slots)
    }

    /// Appends one unset column to set `set_index`
    ///
    /// # Returns
    ///
    /// The set's slots after the append
    pub fn add_url(&self, set_index: usize) -> StoreResult<Vec<Slot>> {
        let slots = self.mutate(|sets| {
            let limit = sets.len();
            let set = sets
                .get_mut(set_index)
                .ok_or_else(|| out_of_range(IndexKind::Set, set_index, limit))?;
            if set.len() >= MAX_COLUMNS {
                return Err(out_of_range(IndexKind::Column, set.len(), MAX_COLUMNS));
            }
            set.push_unset();
            Ok(set.slots().to_vec())
        })?;

        tracing::info!("Added column to set {} ({} columns)", set_index, slots.len());
        Ok(slots)
    }

    fn lock(&self) -> MutexGuard<'_, Vec<UrlSet>> {
        // Guarded data is only ever replaced by a fully persisted draft
        self.sets.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Applies `op` to a copy of the sets, persists it, then publishes it
    fn mutate<T>(&self, op: impl FnOnce(&mut Vec<UrlSet>) -> StoreResult<T>) -> StoreResult<T> {
        let mut sets = self.lock();
        let mut draft = sets.clone();
        let value = op(&mut draft)?;
        self.commit(&mut sets, draft)?;
        Ok(value)
    }

    fn commit(&self, current: &mut Vec<UrlSet>, draft: Vec<UrlSet>) -> StoreResult<()> {
        if let Err(e) = self.backend.save(&draft) {
            tracing::error!("Failed to persist URL sets to {}: {}", self.backend.describe(), e);
            return Err(e);
        }
        *current = draft;
        Ok(())
    }
}

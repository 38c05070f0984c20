//! URL set data model
//!
//! A set is a named row of positional slots. A slot is either unset (`None`) or
//! holds a URL string; an empty string is a real value and is kept distinct
//! from an unset slot.

use serde::{Deserialize, Serialize};

/// One positional column entry. `None` is an unset column.
pub type Slot = Option<String>;

/// A named, ordered group of URL slots
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlSet {
    #[serde(default)]
    name: String,

    #[serde(default)]
    urls: Vec<Slot>,
}

impl UrlSet {
    /// Creates an empty, unnamed set
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a set with the given name and slots
    pub fn with_slots(name: impl Into<String>, urls: Vec<Slot>) -> Self {
        Self {
            name: name.into(),
            urls,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// All slots in column order
    pub fn slots(&self) -> &[Slot] {
        &self.urls
    }

    /// The URL in `column`, if that column exists and is set
    pub fn url_at(&self, column: usize) -> Option<&str> {
        self.urls.get(column).and_then(|slot| slot.as_deref())
    }

    /// Writes `url` into `column`, padding any gap with unset slots
    pub fn set_url_at(&mut self, column: usize, url: impl Into<String>) {
        if column >= self.urls.len() {
            self.urls.resize(column + 1, None);
        }
        self.urls[column] = Some(url.into());
    }

    /// Removes `column`, shifting later slots one to the left
    ///
    /// Returns `None` when the column does not exist.
    pub fn remove_slot(&mut self, column: usize) -> Option<Slot> {
        if column < self.urls.len() {
            Some(self.urls.remove(column))
        } else {
            None
        }
    }

    /// Appends one unset slot
    pub fn push_unset(&mut self) {
        self.urls.push(None);
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

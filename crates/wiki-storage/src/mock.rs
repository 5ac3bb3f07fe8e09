//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::storage::{Entry, Storage, StorageError, StorageErrorKind, first_match};
use crate::title::validate_title;

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// Mock storage for testing.
///
/// Keeps entries in memory in insertion order. Use the builder methods to
/// configure the mock with test data.
///
/// # Example
///
/// ```ignore
/// use wiki_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new()
///     .with_entry("CSS", "# CSS\n\nStyle sheets.");
///
/// assert!(storage.exists("css").unwrap());
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    entries: RwLock<Vec<Entry>>,
    fail_writes: AtomicBool,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry, bypassing the case-insensitive overwrite rule.
    ///
    /// Useful for building stores that violate the uniqueness invariant.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_entry(self, title: impl Into<String>, body: impl Into<String>) -> Self {
        self.entries.write().unwrap().push(Entry::new(title, body));
        self
    }

    /// Make every subsequent `save` fail with an I/O-style error.
    #[must_use]
    pub fn fail_writes(self) -> Self {
        self.fail_writes.store(true, Ordering::SeqCst);
        self
    }

    /// Snapshot of all entries in insertion order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn entries(&self) -> Vec<Entry> {
        self.entries.read().unwrap().clone()
    }
}

impl Storage for MockStorage {
    fn list_titles(&self) -> Result<Vec<String>, StorageError> {
        Ok(self
            .entries
            .read()
            .unwrap()
            .iter()
            .map(|e| e.title.clone())
            .collect())
    }

    fn find(&self, title: &str) -> Result<Option<Entry>, StorageError> {
        let entries = self.entries.read().unwrap();
        let found = first_match(entries.iter().map(|e| e.title.as_str()), title);
        Ok(found.and_then(|t| entries.iter().find(|e| e.title == t).cloned()))
    }

    fn save(&self, title: &str, body: &str) -> Result<(), StorageError> {
        validate_title(title).map_err(|e| e.with_backend(BACKEND))?;

        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::new(StorageErrorKind::Other)
                .with_title(title)
                .with_backend(BACKEND)
                .with_message("simulated write failure"));
        }

        let mut entries = self.entries.write().unwrap();
        let existing = first_match(entries.iter().map(|e| e.title.as_str()), title)
            .map(str::to_owned);
        match existing {
            Some(stored) => {
                if let Some(entry) = entries.iter_mut().find(|e| e.title == stored) {
                    body.clone_into(&mut entry.body);
                }
            }
            None => entries.push(Entry::new(title, body)),
        }
        Ok(())
    }
}

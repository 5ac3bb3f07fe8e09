//! Entry store abstraction for the wiki.
//!
//! This crate provides a [`Storage`] trait mapping entry titles to their raw
//! markup. Titles are compared case-insensitively; the casing an entry was
//! first written with is preserved for display.
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Storage`] trait with `list_titles()`, `find()`, `get()`, `save()` and `exists()`
//! - [`StorageError`] with a semantic [`StorageErrorKind`]
//! - [`MockStorage`] for testing (behind `mock` feature flag)
//!
//! The filesystem backend lives in the `wiki-storage-fs` crate.
//!
//! # Example
//!
//! ```ignore
//! use wiki_storage::Storage;
//!
//! storage.save("Python", "# Python\n\nA language.")?;
//! assert_eq!(storage.get("PYTHON")?.as_deref(), Some("# Python\n\nA language."));
//! ```

#[cfg(feature = "mock")]
mod mock;
mod storage;
mod title;

#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use storage::{Entry, Storage, StorageError, StorageErrorKind, first_match};
pub use title::{titles_match, validate_title};

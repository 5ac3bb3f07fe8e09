//! Storage trait and error types.
//!
//! Provides the core [`Storage`] trait for looking up, enumerating and saving
//! entries, along with [`StorageError`] for unified error handling across
//! backends.
//!
//! # Title Convention
//!
//! Every title parameter is matched case-insensitively against stored titles
//! (see [`titles_match`](crate::titles_match)). Looking up `"python"` finds an
//! entry stored as `"Python"`. Absence is a normal outcome and is reported as
//! `Ok(None)`, never as an error.

use std::fmt;

use crate::title::titles_match;

/// A stored entry: its title as first written and its raw markup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    /// Title with its original casing.
    pub title: String,
    /// Raw markup text.
    pub body: String,
}

impl Entry {
    /// Create an entry.
    #[must_use]
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Semantic error categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// Backing resource does not exist (e.g., a file vanished mid-read).
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Title cannot name an entry.
    InvalidTitle,
    /// Other/unknown error category.
    Other,
}

/// Storage error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StorageError {
    kind: StorageErrorKind,
    title: Option<String>,
    backend: Option<&'static str>,
    message: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    /// Create a new storage error.
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            title: None,
            backend: None,
            message: None,
            source: None,
        }
    }

    /// Attach the entry title the operation was working on.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach a short explanation.
    #[must_use]
    pub fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Semantic error category.
    #[must_use]
    pub fn kind(&self) -> StorageErrorKind {
        self.kind
    }

    /// Title context, if any.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Backend identifier, if any.
    #[must_use]
    pub fn backend(&self) -> Option<&'static str> {
        self.backend
    }

    /// Create a storage error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, title: Option<&str>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StorageErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => StorageErrorKind::PermissionDenied,
            _ => StorageErrorKind::Other,
        };
        let mut error = Self::new(kind).with_source(err);
        if let Some(title) = title {
            error = error.with_title(title);
        }
        error
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "[Backend] Kind: message: source (title: Foo)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StorageErrorKind::NotFound => "Not found",
            StorageErrorKind::PermissionDenied => "Permission denied",
            StorageErrorKind::InvalidTitle => "Invalid title",
            StorageErrorKind::Other => "Error",
        };
        write!(f, "{kind_str}")?;

        if let Some(message) = self.message {
            write!(f, ": {message}")?;
        }
        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }
        if let Some(title) = &self.title {
            write!(f, " (title: {title})")?;
        }

        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Entry store: a flat, case-insensitive mapping from title to markup.
///
/// Implementations must enumerate titles in a deterministic order for the
/// lifetime of the process and never report the same title twice.
///
/// `save` replaces the whole body. When the title matches an existing entry
/// only by case, the existing entry is overwritten and keeps its original
/// title casing.
pub trait Storage: Send + Sync {
    /// Return all entry titles in the store's natural order.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be enumerated.
    fn list_titles(&self) -> Result<Vec<String>, StorageError>;

    /// Look up an entry by title, ignoring case.
    ///
    /// If several stored titles match (which the uniqueness rule should
    /// prevent), the first in enumeration order wins. Returns `Ok(None)` when
    /// nothing matches, including for titles that could never be stored.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the entry exists but can't be read.
    fn find(&self, title: &str) -> Result<Option<Entry>, StorageError>;

    /// Create or overwrite an entry.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] with [`StorageErrorKind::InvalidTitle`] for
    /// titles rejected by [`validate_title`](crate::validate_title), or any
    /// other kind when the write fails. A failed save leaves the previous
    /// body in place.
    fn save(&self, title: &str, body: &str) -> Result<(), StorageError>;

    /// Look up an entry body by title, ignoring case.
    ///
    /// # Errors
    ///
    /// Same as [`find`](Self::find).
    fn get(&self, title: &str) -> Result<Option<String>, StorageError> {
        Ok(self.find(title)?.map(|entry| entry.body))
    }

    /// Check whether an entry matching `title` exists.
    ///
    /// # Errors
    ///
    /// Same as [`find`](Self::find).
    fn exists(&self, title: &str) -> Result<bool, StorageError> {
        Ok(self.find(title)?.is_some())
    }
}

/// Pick the first title in `titles` that matches `title` case-insensitively.
///
/// Shared by backends that resolve lookups against their enumeration.
pub fn first_match<'a>(
    titles: impl IntoIterator<Item = &'a str>,
    title: &str,
) -> Option<&'a str> {
    titles.into_iter().find(|candidate| titles_match(candidate, title))
}

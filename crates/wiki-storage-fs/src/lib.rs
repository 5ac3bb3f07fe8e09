//! Filesystem entry store for the wiki.
//!
//! This crate provides [`FsStorage`], a filesystem-based implementation of the
//! [`Storage`](wiki_storage::Storage) trait. Each entry is one file named
//! `<title>.<extension>` in a single flat directory:
//!
//! ```text
//! entries/
//! ├── CSS.md
//! ├── Git.md
//! └── Python.md
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use wiki_storage::Storage;
//! use wiki_storage_fs::FsStorage;
//!
//! let storage = FsStorage::new(PathBuf::from("entries"));
//! for title in storage.list_titles()? {
//!     println!("{title}");
//! }
//! ```

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use wiki_storage::{Entry, Storage, StorageError, first_match, validate_title};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Default entry file extension.
const DEFAULT_EXTENSION: &str = "md";

/// Filesystem storage implementation.
///
/// Titles are file stems. Lookups scan the directory listing and compare
/// stems case-insensitively, so `get("css")` finds `CSS.md` on any
/// filesystem. Overwrites reuse the existing file name, which keeps the
/// casing the entry was created with.
pub struct FsStorage {
    /// Directory holding one file per entry.
    entries_dir: PathBuf,
    /// Entry file extension without the leading dot.
    extension: String,
    /// Counter for unique temporary file names.
    write_seq: AtomicU64,
}

impl FsStorage {
    /// Create a new filesystem storage using the `md` extension.
    ///
    /// The directory does not need to exist yet; it is created on first save.
    #[must_use]
    pub fn new(entries_dir: PathBuf) -> Self {
        Self::with_extension(entries_dir, DEFAULT_EXTENSION)
    }

    /// Create a new filesystem storage with a custom entry file extension.
    ///
    /// # Arguments
    ///
    /// * `entries_dir` - Directory containing entry files
    /// * `extension` - File extension without the dot (e.g., "md", "txt")
    #[must_use]
    pub fn with_extension(entries_dir: PathBuf, extension: &str) -> Self {
        Self {
            entries_dir,
            extension: extension.trim_start_matches('.').to_owned(),
            write_seq: AtomicU64::new(0),
        }
    }

    /// Path of the file backing `title`.
    fn entry_path(&self, title: &str) -> PathBuf {
        self.entries_dir.join(format!("{title}.{}", self.extension))
    }

    /// Title for a directory entry, if it is a visible entry file.
    fn title_for(&self, path: &Path) -> Option<String> {
        if path.extension().is_none_or(|e| e != self.extension.as_str()) {
            return None;
        }
        let Some(stem) = path.file_stem()?.to_str() else {
            tracing::warn!(path = %path.display(), "Skipping entry file with non UTF-8 name");
            return None;
        };
        // Hidden files cannot be entry titles
        if stem.is_empty() || stem.starts_with('.') {
            return None;
        }
        Some(stem.to_owned())
    }

    /// Scan the entries directory.
    fn scan(&self) -> Result<Vec<String>, StorageError> {
        let dir = match fs::read_dir(&self.entries_dir) {
            Ok(dir) => dir,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(dir = %self.entries_dir.display(), "Entries directory missing, store is empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(StorageError::io(e, None).with_backend(BACKEND)),
        };

        let mut titles: Vec<(String, String)> = dir
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_ok_and(|t| t.is_file()))
            .filter_map(|e| self.title_for(&e.path()))
            .map(|title| (title.to_lowercase(), title))
            .collect();

        // Case-insensitive order, exact name as tie-breaker
        titles.sort();
        Ok(titles.into_iter().map(|(_, title)| title).collect())
    }

    /// Write `body` to `path` through a temporary sibling file and a rename.
    fn write_atomic(&self, path: &Path, title: &str, body: &str) -> Result<(), StorageError> {
        let io_err = |e: std::io::Error| StorageError::io(e, Some(title)).with_backend(BACKEND);

        fs::create_dir_all(&self.entries_dir).map_err(io_err)?;

        let seq = self.write_seq.fetch_add(1, Ordering::Relaxed);
        let tmp_path = self
            .entries_dir
            .join(format!(".{}.{seq}.tmp", std::process::id()));

        let result = fs::File::create(&tmp_path)
            .and_then(|mut file| {
                file.write_all(body.as_bytes())?;
                file.sync_all()
            })
            .and_then(|()| fs::rename(&tmp_path, path));

        if let Err(e) = result {
            let _ = fs::remove_file(&tmp_path);
            return Err(io_err(e));
        }
        Ok(())
    }
}

impl Storage for FsStorage {
    fn list_titles(&self) -> Result<Vec<String>, StorageError> {
        self.scan()
    }

    fn find(&self, title: &str) -> Result<Option<Entry>, StorageError> {
        if validate_title(title).is_err() {
            return Ok(None);
        }

        let titles = self.scan()?;
        let Some(stored) = first_match(titles.iter().map(String::as_str), title) else {
            return Ok(None);
        };

        let body = fs::read_to_string(self.entry_path(stored))
            .map_err(|e| StorageError::io(e, Some(stored)).with_backend(BACKEND))?;
        Ok(Some(Entry::new(stored, body)))
    }

    fn save(&self, title: &str, body: &str) -> Result<(), StorageError> {
        validate_title(title).map_err(|e| e.with_backend(BACKEND))?;

        let titles = self.scan().map_err(|e| e.with_title(title))?;
        let target = match first_match(titles.iter().map(String::as_str), title) {
            Some(stored) => {
                if stored != title {
                    tracing::debug!(requested = %title, stored = %stored, "Overwriting entry under its original title");
                }
                self.entry_path(stored)
            }
            None => self.entry_path(title),
        };

        self.write_atomic(&target, title, body)
    }
}

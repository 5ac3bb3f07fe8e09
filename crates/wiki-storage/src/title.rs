//! Entry title rules shared by all backends.

use crate::storage::{StorageError, StorageErrorKind};

/// Compare two titles the way the store does: equal after lowercasing both.
///
/// # Examples
///
/// ```
/// use wiki_storage::titles_match;
///
/// assert!(titles_match("CSS", "css"));
/// assert!(!titles_match("CSS", "CSS3"));
/// ```
pub fn titles_match(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

/// Check that a title can name an entry.
///
/// A title must contain something other than whitespace and must not be able
/// to address anything outside the flat entry namespace: no path separators,
/// no NUL bytes, no leading dot and no `..` sequence.
pub fn validate_title(title: &str) -> Result<(), StorageError> {
    let reason = if title.trim().is_empty() {
        Some("title cannot be empty")
    } else if title.contains(['/', '\\', '\0']) {
        Some("title cannot contain path separators")
    } else if title.starts_with('.') || title.contains("..") {
        Some("title cannot start with a dot or contain '..'")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(StorageError::new(StorageErrorKind::InvalidTitle)
            .with_title(title)
            .with_message(reason)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_titles_match_ignores_case() {
        assert!(titles_match("Python", "python"));
        assert!(titles_match("Python", "PYTHON"));
        assert!(titles_match("Ärger", "ärger"));
    }

    #[test]
    fn test_titles_match_requires_whole_title() {
        assert!(!titles_match("Python", "Pythonic History"));
        assert!(!titles_match("Python", "Pytho"));
    }

    #[test]
    fn test_validate_title_accepts_plain_titles() {
        assert!(validate_title("Python").is_ok());
        assert!(validate_title("Pythonic History").is_ok());
        assert!(validate_title("C++").is_ok());
        assert!(validate_title("HTML5").is_ok());
    }

    #[test]
    fn test_validate_title_rejects_empty() {
        let err = validate_title("   ").unwrap_err();

        assert_eq!(err.kind(), StorageErrorKind::InvalidTitle);
    }

    #[test]
    fn test_validate_title_rejects_separators() {
        assert!(validate_title("a/b").is_err());
        assert!(validate_title("a\\b").is_err());
        assert!(validate_title("a\0b").is_err());
    }

    #[test]
    fn test_validate_title_rejects_traversal() {
        assert!(validate_title("..").is_err());
        assert!(validate_title(".hidden").is_err());
        assert!(validate_title("a..b").is_err());
    }
}

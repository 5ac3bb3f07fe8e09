//! The [`Wiki`] resolver.

use std::sync::Arc;

use rand::RngExt;
use wiki_renderer::TocEntry;
use wiki_storage::{Entry, Storage, StorageError};

use crate::search::matching_titles;

/// Outcome of viewing an entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewDecision {
    /// The query matched a stored entry.
    Found {
        /// Canonical title: first heading of the rendered body, or the query
        /// as given when the body has no usable heading.
        title: String,
        /// Title the entry is stored under.
        entry_title: String,
        /// Rendered body.
        html: String,
        /// Table of contents of the rendered body.
        toc: Vec<TocEntry>,
    },
    /// No exact match; `matches` lists titles containing the query.
    NotFoundButRelated {
        /// Query as given.
        query: String,
        /// Related titles in store order (possibly empty).
        matches: Vec<String>,
    },
}

/// Outcome of a search submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchDecision {
    /// The query names an entry; redirect to this title.
    Exact(String),
    /// No exact match; show the related titles.
    Related {
        /// Query as given.
        query: String,
        /// Related titles in store order (possibly empty).
        matches: Vec<String>,
    },
}

/// Outcome of creating an entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CreateDecision {
    /// The entry was saved under this title.
    Created(String),
    /// An entry with this title (ignoring case) already exists. Nothing was
    /// written.
    Conflict(String),
}

/// Error returned when resolution cannot complete.
#[derive(Debug, thiserror::Error)]
pub enum WikiError {
    /// The entry store failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Entry resolver over a shared storage backend.
#[derive(Clone)]
pub struct Wiki {
    storage: Arc<dyn Storage>,
}

impl Wiki {
    /// Create a resolver over `storage`.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// All entry titles in store order.
    pub fn list_titles(&self) -> Result<Vec<String>, WikiError> {
        Ok(self.storage.list_titles()?)
    }

    /// Titles containing `query`, ignoring case.
    pub fn search(&self, query: &str) -> Result<Vec<String>, WikiError> {
        let titles = self.storage.list_titles()?;
        Ok(matching_titles(&titles, query))
    }

    /// Raw entry for pre-filling an edit form.
    pub fn entry_source(&self, title: &str) -> Result<Option<Entry>, WikiError> {
        Ok(self.storage.find(title)?)
    }

    /// Resolve a title for display.
    ///
    /// An exact (case-insensitive) match is rendered. Otherwise every title
    /// containing `query` is returned as related.
    pub fn resolve_view(&self, query: &str) -> Result<ViewDecision, WikiError> {
        let Some(entry) = self.storage.find(query)? else {
            let matches = self.search(query)?;
            tracing::debug!(query = %query, related = matches.len(), "No entry, listing related titles");
            return Ok(ViewDecision::NotFoundButRelated {
                query: query.to_owned(),
                matches,
            });
        };

        let rendered = wiki_renderer::render(&entry.body);
        let title = rendered.title.unwrap_or_else(|| {
            tracing::warn!(entry = %entry.title, "Entry has no level-1 heading, using requested title");
            query.to_owned()
        });

        Ok(ViewDecision::Found {
            title,
            entry_title: entry.title,
            html: rendered.html,
            toc: rendered.toc,
        })
    }

    /// Resolve a search query.
    ///
    /// An exact match redirects to its [canonical target](Self::canonical_target).
    /// Otherwise the related titles are listed.
    pub fn resolve_search(&self, query: &str) -> Result<SearchDecision, WikiError> {
        match self.storage.find(query)? {
            Some(entry) => Ok(SearchDecision::Exact(self.target_for(&entry)?)),
            None => Ok(SearchDecision::Related {
                query: query.to_owned(),
                matches: self.search(query)?,
            }),
        }
    }

    /// Create a new entry unless the title is already taken.
    ///
    /// The conflict check ignores case: creating `"css"` when `"CSS"` exists
    /// is a conflict, and the store is left untouched.
    pub fn resolve_create(&self, title: &str, body: &str) -> Result<CreateDecision, WikiError> {
        if self.storage.exists(title)? {
            tracing::debug!(title = %title, "Create rejected, entry exists");
            return Ok(CreateDecision::Conflict(title.to_owned()));
        }

        self.storage.save(title, body)?;
        tracing::info!(title = %title, "Entry created");
        Ok(CreateDecision::Created(title.to_owned()))
    }

    /// Save an entry, creating or overwriting it.
    ///
    /// Unlike [`resolve_create`](Self::resolve_create), editing never
    /// conflicts.
    pub fn resolve_edit(&self, title: &str, body: &str) -> Result<(), WikiError> {
        self.storage.save(title, body)?;
        tracing::info!(title = %title, "Entry saved");
        Ok(())
    }

    /// Pick a title uniformly at random, or `None` for an empty store.
    pub fn resolve_random(&self) -> Result<Option<String>, WikiError> {
        let mut titles = self.storage.list_titles()?;
        if titles.is_empty() {
            return Ok(None);
        }
        let index = rand::rng().random_range(0..titles.len());
        Ok(Some(titles.swap_remove(index)))
    }

    /// Title a redirect to `title` should point at.
    ///
    /// Prefers the first heading of the entry's rendered body when that
    /// heading resolves back to the same entry, then the stored title. Titles
    /// that match nothing are returned unchanged.
    pub fn canonical_target(&self, title: &str) -> Result<String, WikiError> {
        match self.storage.find(title)? {
            Some(entry) => self.target_for(&entry),
            None => Ok(title.to_owned()),
        }
    }

    fn target_for(&self, entry: &Entry) -> Result<String, WikiError> {
        if let Some(heading) = wiki_renderer::render(&entry.body).title
            && self
                .storage
                .find(&heading)?
                .is_some_and(|found| found.title == entry.title)
        {
            return Ok(heading);
        }
        Ok(entry.title.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;
    use wiki_storage::{MockStorage, StorageErrorKind};

    use super::*;

    fn wiki_with(storage: MockStorage) -> (Wiki, Arc<MockStorage>) {
        let storage = Arc::new(storage);
        let shared: Arc<dyn Storage> = Arc::clone(&storage) as Arc<dyn Storage>;
        (Wiki::new(shared), storage)
    }

    #[test]
    fn test_view_found_ignores_case() {
        let (wiki, _) = wiki_with(MockStorage::new().with_entry("Python", "# Python\n\nA language."));

        let decision = wiki.resolve_view("python").unwrap();

        let ViewDecision::Found {
            title,
            entry_title,
            html,
            ..
        } = decision
        else {
            panic!("expected Found");
        };
        assert_eq!(title, "Python");
        assert_eq!(entry_title, "Python");
        assert!(html.contains("<p>A language.</p>"));
    }

    #[test]
    fn test_view_found_without_heading_falls_back_to_query() {
        let (wiki, _) = wiki_with(MockStorage::new().with_entry("Python", "No heading here."));

        let ViewDecision::Found { title, .. } = wiki.resolve_view("pYthon").unwrap() else {
            panic!("expected Found");
        };

        assert_eq!(title, "pYthon");
    }

    #[test]
    fn test_view_not_found_without_related() {
        let (wiki, _) = wiki_with(
            MockStorage::new()
                .with_entry("Python", "# Python")
                .with_entry("Pythonic History", "# Pythonic History"),
        );

        assert_eq!(
            wiki.resolve_view("java").unwrap(),
            ViewDecision::NotFoundButRelated {
                query: "java".to_owned(),
                matches: Vec::new(),
            }
        );
    }

    #[test]
    fn test_view_not_found_with_related() {
        let (wiki, _) = wiki_with(
            MockStorage::new()
                .with_entry("Python", "# Python")
                .with_entry("Pythonic History", "# Pythonic History")
                .with_entry("CSS", "# CSS"),
        );

        assert_eq!(
            wiki.resolve_view("pyth").unwrap(),
            ViewDecision::NotFoundButRelated {
                query: "pyth".to_owned(),
                matches: vec!["Python".to_owned(), "Pythonic History".to_owned()],
            }
        );
    }

    #[test]
    fn test_empty_store() {
        let (wiki, _) = wiki_with(MockStorage::new());

        assert_eq!(
            wiki.resolve_view("java").unwrap(),
            ViewDecision::NotFoundButRelated {
                query: "java".to_owned(),
                matches: Vec::new(),
            }
        );
        assert_eq!(wiki.resolve_random().unwrap(), None);
    }

    #[test]
    fn test_create_conflict_leaves_store_unchanged() {
        let (wiki, storage) = wiki_with(MockStorage::new().with_entry("CSS", "original"));

        let decision = wiki.resolve_create("css", "new body").unwrap();

        assert_eq!(decision, CreateDecision::Conflict("css".to_owned()));
        assert_eq!(storage.entries(), vec![Entry::new("CSS", "original")]);
    }

    #[test]
    fn test_create_saves_new_entry() {
        let (wiki, storage) = wiki_with(MockStorage::new().with_entry("CSS", "x"));

        let decision = wiki.resolve_create("HTML", "# HTML").unwrap();

        assert_eq!(decision, CreateDecision::Created("HTML".to_owned()));
        assert_eq!(storage.get("html").unwrap().as_deref(), Some("# HTML"));
    }

    #[test]
    fn test_edit_overwrites_existing() {
        let (wiki, storage) = wiki_with(MockStorage::new().with_entry("CSS", "original"));

        wiki.resolve_edit("css", "new body").unwrap();

        assert_eq!(storage.get("CSS").unwrap().as_deref(), Some("new body"));
        assert_eq!(storage.list_titles().unwrap(), vec!["CSS"]);
    }

    #[test]
    fn test_edit_creates_missing() {
        let (wiki, storage) = wiki_with(MockStorage::new());

        wiki.resolve_edit("Git", "# Git").unwrap();

        assert_eq!(storage.get("git").unwrap().as_deref(), Some("# Git"));
    }

    #[test]
    fn test_storage_failure_propagates() {
        let (wiki, _) = wiki_with(MockStorage::new().fail_writes());

        let err = wiki.resolve_create("Git", "# Git").unwrap_err();

        let WikiError::Storage(inner) = err;
        assert_eq!(inner.kind(), StorageErrorKind::Other);
        assert!(wiki.resolve_edit("Git", "# Git").is_err());
    }

    #[test]
    fn test_random_returns_stored_title() {
        let (wiki, _) = wiki_with(
            MockStorage::new()
                .with_entry("CSS", "")
                .with_entry("Git", "")
                .with_entry("Python", ""),
        );
        let titles: HashSet<String> = wiki.list_titles().unwrap().into_iter().collect();

        let mut seen = HashSet::new();
        for _ in 0..200 {
            let picked = wiki.resolve_random().unwrap().unwrap();
            assert!(titles.contains(&picked));
            seen.insert(picked);
        }
        // 200 uniform draws over 3 titles miss one with probability ~1e-35
        assert_eq!(seen, titles);
    }

    #[test]
    fn test_search_exact_redirects_to_heading() {
        let (wiki, _) = wiki_with(MockStorage::new().with_entry("python", "# Python\n\nBody."));

        assert_eq!(
            wiki.resolve_search("PYTHON").unwrap(),
            SearchDecision::Exact("Python".to_owned())
        );
    }

    #[test]
    fn test_search_heading_naming_other_page_uses_stored_title() {
        let (wiki, _) = wiki_with(MockStorage::new().with_entry("Py", "# Python Language"));

        assert_eq!(
            wiki.resolve_search("py").unwrap(),
            SearchDecision::Exact("Py".to_owned())
        );
    }

    #[test]
    fn test_search_heading_naming_another_entry_keeps_match() {
        let (wiki, _) = wiki_with(
            MockStorage::new()
                .with_entry("Py", "# Python\n\nShort name.")
                .with_entry("Python", "# Python 3\n\nThe language."),
        );

        assert_eq!(
            wiki.resolve_search("Py").unwrap(),
            SearchDecision::Exact("Py".to_owned())
        );
        assert_eq!(wiki.canonical_target("py").unwrap(), "Py");
        assert_eq!(wiki.canonical_target("Python").unwrap(), "Python");
    }

    #[test]
    fn test_search_related() {
        let (wiki, _) = wiki_with(
            MockStorage::new()
                .with_entry("Git", "# Git")
                .with_entry("GitHub", "# GitHub"),
        );

        assert_eq!(
            wiki.resolve_search("gi").unwrap(),
            SearchDecision::Related {
                query: "gi".to_owned(),
                matches: vec!["Git".to_owned(), "GitHub".to_owned()],
            }
        );
    }

    #[test]
    fn test_canonical_target_for_missing_title() {
        let (wiki, _) = wiki_with(MockStorage::new());

        assert_eq!(wiki.canonical_target("Nothing").unwrap(), "Nothing");
    }

    #[test]
    fn test_canonical_target_without_heading() {
        let (wiki, _) = wiki_with(MockStorage::new().with_entry("CSS", "plain text"));

        assert_eq!(wiki.canonical_target("css").unwrap(), "CSS");
    }

    #[test]
    fn test_entry_source() {
        let (wiki, _) = wiki_with(MockStorage::new().with_entry("CSS", "# CSS\n\nraw *markup*"));

        let entry = wiki.entry_source("css").unwrap().unwrap();

        assert_eq!(entry.body, "# CSS\n\nraw *markup*");
        assert_eq!(wiki.entry_source("nope").unwrap(), None);
    }
}

//! HTTP request handlers.
//!
//! Every handler that accepts POST routes a non-empty `q` field to search
//! before looking at its own form fields.

pub(crate) mod create;
pub(crate) mod edit;
pub(crate) mod entry;
pub(crate) mod index;
pub(crate) mod random;

use axum::response::{Html, IntoResponse, Redirect, Response};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;
use wiki_site::{SearchDecision, Wiki};

use crate::error::ServerError;
use crate::views;

/// Unreserved URL characters: A-Z a-z 0-9 - . _ ~
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Form fields shared by every page.
///
/// All fields are optional. Handlers decide which ones they require.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct EntryForm {
    /// Search query from the shared search box.
    pub(crate) q: Option<String>,
    /// Entry title (create and edit).
    pub(crate) title: Option<String>,
    /// Entry body (create and edit).
    pub(crate) content: Option<String>,
}

impl EntryForm {
    /// Non-blank search query, if one was submitted.
    pub(crate) fn query(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }

    /// Submitted title, trimmed.
    pub(crate) fn require_title(&self) -> Result<&str, ServerError> {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(ServerError::MissingField("title"))
    }

    /// Submitted body, empty when absent.
    pub(crate) fn content(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }
}

/// URL of the page for `title`.
pub(crate) fn entry_path(title: &str) -> String {
    format!("/wiki/{}", utf8_percent_encode(title, PATH_SEGMENT))
}

/// URL of the edit form for `title`.
pub(crate) fn edit_path(title: &str) -> String {
    format!("/wiki/edit/?{}", utf8_percent_encode(title, PATH_SEGMENT))
}

/// Redirect to the page for `title`.
pub(crate) fn redirect_to_entry(title: &str) -> Response {
    Redirect::to(&entry_path(title)).into_response()
}

/// Run a search and answer with a redirect or a results page.
///
/// A blank query lists every title.
pub(crate) fn search_response(wiki: &Wiki, query: &str) -> Result<Response, ServerError> {
    match wiki.resolve_search(query)? {
        SearchDecision::Exact(title) => {
            tracing::debug!(query = %query, target = %title, "Search matched an entry");
            Ok(redirect_to_entry(&title))
        }
        SearchDecision::Related { query, matches } => {
            Ok(Html(views::search_results(&query, &matches)).into_response())
        }
    }
}

/// Search when the form carries a query, otherwise defer to `action`.
pub(crate) fn search_or(
    wiki: &Wiki,
    form: &EntryForm,
    action: impl FnOnce() -> Result<Response, ServerError>,
) -> Result<Response, ServerError> {
    match form.query() {
        Some(query) => search_response(wiki, query),
        None => action(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_entry_path_encodes_title() {
        assert_eq!(entry_path("Python"), "/wiki/Python");
        assert_eq!(entry_path("Pythonic History"), "/wiki/Pythonic%20History");
        assert_eq!(entry_path("C++ & C#"), "/wiki/C%2B%2B%20%26%20C%23");
        assert_eq!(entry_path("Café"), "/wiki/Caf%C3%A9");
    }

    #[test]
    fn test_edit_path_puts_title_in_query() {
        assert_eq!(edit_path("Pythonic History"), "/wiki/edit/?Pythonic%20History");
    }

    #[test]
    fn test_form_query_ignores_blank() {
        let form = EntryForm {
            q: Some("   ".to_owned()),
            ..Default::default()
        };

        assert_eq!(form.query(), None);
    }

    #[test]
    fn test_form_require_title() {
        let missing = EntryForm::default();
        let blank = EntryForm {
            title: Some(" ".to_owned()),
            ..Default::default()
        };
        let present = EntryForm {
            title: Some(" CSS ".to_owned()),
            ..Default::default()
        };

        assert!(matches!(
            missing.require_title(),
            Err(ServerError::MissingField("title"))
        ));
        assert!(blank.require_title().is_err());
        assert_eq!(present.require_title().unwrap(), "CSS");
    }

    #[test]
    fn test_form_content_defaults_to_empty() {
        assert_eq!(EntryForm::default().content(), "");
    }
}

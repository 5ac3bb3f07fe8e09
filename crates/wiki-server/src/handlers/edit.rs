//! Editing entries: `/wiki/edit/`.

use std::sync::Arc;

use axum::Form;
use axum::extract::{RawQuery, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use percent_encoding::percent_decode_str;

use super::{EntryForm, redirect_to_entry, search_or};
use crate::error::ServerError;
use crate::state::AppState;
use crate::views;

/// Handle GET /wiki/edit/?{title}.
///
/// The query string is the title itself. `title={title}` is accepted too.
pub(crate) async fn get_edit(
    RawQuery(query): RawQuery,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ServerError> {
    let title = query
        .as_deref()
        .and_then(title_from_query)
        .ok_or(ServerError::MissingField("title"))?;

    match state.wiki.entry_source(&title)? {
        Some(entry) => Ok(Html(views::edit_form(&entry.title, &entry.body)).into_response()),
        None => {
            let matches = state.wiki.search(&title)?;
            Ok((
                StatusCode::NOT_FOUND,
                Html(views::not_found(&title, &matches)),
            )
                .into_response())
        }
    }
}

/// Handle POST /wiki/edit/.
///
/// Saves unconditionally and redirects to the entry.
pub(crate) async fn post_edit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<EntryForm>,
) -> Result<Response, ServerError> {
    search_or(&state.wiki, &form, || {
        let title = form.require_title()?;
        state.wiki.resolve_edit(title, form.content())?;
        Ok(redirect_to_entry(&state.wiki.canonical_target(title)?))
    })
}

/// Extract the entry title from a raw query string.
///
/// `+` decodes to a space. Returns `None` for a blank title.
fn title_from_query(query: &str) -> Option<String> {
    let raw = query
        .split('&')
        .find_map(|pair| pair.strip_prefix("title="))
        .unwrap_or(query);
    let spaced = raw.replace('+', " ");
    let title = percent_decode_str(&spaced).decode_utf8_lossy();
    let title = title.trim();
    (!title.is_empty()).then(|| title.to_owned())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_title_from_bare_query() {
        assert_eq!(title_from_query("Python").as_deref(), Some("Python"));
        assert_eq!(
            title_from_query("Pythonic%20History").as_deref(),
            Some("Pythonic History")
        );
        assert_eq!(
            title_from_query("Pythonic+History").as_deref(),
            Some("Pythonic History")
        );
    }

    #[test]
    fn test_title_from_named_parameter() {
        assert_eq!(title_from_query("title=CSS").as_deref(), Some("CSS"));
        assert_eq!(title_from_query("x=1&title=C%2B%2B").as_deref(), Some("C++"));
    }

    #[test]
    fn test_title_from_blank_query() {
        assert_eq!(title_from_query(""), None);
        assert_eq!(title_from_query("title="), None);
        assert_eq!(title_from_query("+%20"), None);
    }
}

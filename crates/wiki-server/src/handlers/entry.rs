//! Entry pages: `/wiki/{title}`.

use std::sync::Arc;

use axum::Form;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use md5::{Digest, Md5};
use wiki_site::ViewDecision;

use super::{EntryForm, search_response};
use crate::error::ServerError;
use crate::state::AppState;
use crate::views;

/// Handle GET /wiki/{title}.
///
/// An exact match renders the entry. Anything else is a 404 listing
/// related titles.
pub(crate) async fn get_entry(
    Path(title): Path<String>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    match state.wiki.resolve_view(&title)? {
        ViewDecision::Found {
            title,
            entry_title,
            html,
            toc,
        } => {
            let page = views::entry(&title, &entry_title, &html, &toc);
            let etag = compute_etag(&state.version, &page);

            // Check If-None-Match header for conditional request
            if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
                && if_none_match.as_bytes() == etag.as_bytes()
            {
                return Ok(StatusCode::NOT_MODIFIED.into_response());
            }

            Ok((
                [
                    (header::ETAG, etag),
                    (header::CACHE_CONTROL, "no-cache".to_owned()),
                ],
                Html(page),
            )
                .into_response())
        }
        ViewDecision::NotFoundButRelated { query, matches } => Ok((
            StatusCode::NOT_FOUND,
            Html(views::not_found(&query, &matches)),
        )
            .into_response()),
    }
}

/// Handle POST /wiki/{title}: search for `q`.
pub(crate) async fn post_entry(
    State(state): State<Arc<AppState>>,
    Form(form): Form<EntryForm>,
) -> Result<Response, ServerError> {
    search_response(&state.wiki, form.query().unwrap_or_default())
}

/// Compute `ETag` from version and content.
///
/// Uses MD5 hash truncated to 64 bits (16 hex chars).
fn compute_etag(version: &str, content: &str) -> String {
    let hash = Md5::digest(format!("{version}:{content}").as_bytes());
    format!("\"{}\"", &hex::encode(hash)[..16])
}

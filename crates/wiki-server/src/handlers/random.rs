//! Random entry: `/wiki/random/`.

use std::sync::Arc;

use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};

use super::redirect_to_entry;
use crate::error::ServerError;
use crate::state::AppState;
use crate::views;

/// Handle GET /wiki/random/.
///
/// Redirects to a uniformly chosen entry. An empty wiki shows the home page.
pub(crate) async fn get_random(State(state): State<Arc<AppState>>) -> Result<Response, ServerError> {
    match state.wiki.resolve_random()? {
        Some(title) => Ok(redirect_to_entry(&state.wiki.canonical_target(&title)?)),
        None => Ok(Html(views::index(&[])).into_response()),
    }
}

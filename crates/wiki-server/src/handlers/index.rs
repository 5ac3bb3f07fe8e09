//! Home page: `/`.

use std::sync::Arc;

use axum::Form;
use axum::extract::State;
use axum::response::{Html, Response};

use super::{EntryForm, search_response};
use crate::error::ServerError;
use crate::state::AppState;
use crate::views;

/// Handle GET /.
pub(crate) async fn get_index(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, ServerError> {
    let titles = state.wiki.list_titles()?;
    Ok(Html(views::index(&titles)))
}

/// Handle POST /: search for `q`. A blank query lists every title.
pub(crate) async fn post_index(
    State(state): State<Arc<AppState>>,
    Form(form): Form<EntryForm>,
) -> Result<Response, ServerError> {
    search_response(&state.wiki, form.query().unwrap_or_default())
}

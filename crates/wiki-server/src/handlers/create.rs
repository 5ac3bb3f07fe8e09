//! New entries: `/wiki/create/`.

use std::sync::Arc;

use axum::Form;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use wiki_site::CreateDecision;

use super::{EntryForm, redirect_to_entry, search_or};
use crate::error::ServerError;
use crate::state::AppState;
use crate::views;

/// Handle GET /wiki/create/.
pub(crate) async fn get_create() -> Html<String> {
    Html(views::create_form())
}

/// Handle POST /wiki/create/.
///
/// Redirects to the new entry, or answers 409 when the title is taken.
pub(crate) async fn post_create(
    State(state): State<Arc<AppState>>,
    Form(form): Form<EntryForm>,
) -> Result<Response, ServerError> {
    search_or(&state.wiki, &form, || {
        let title = form.require_title()?;
        match state.wiki.resolve_create(title, form.content())? {
            CreateDecision::Created(title) => {
                Ok(redirect_to_entry(&state.wiki.canonical_target(&title)?))
            }
            CreateDecision::Conflict(title) => {
                Ok((StatusCode::CONFLICT, Html(views::conflict(&title))).into_response())
            }
        }
    })
}

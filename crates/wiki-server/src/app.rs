//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;

/// Create the application router.
///
/// # Arguments
///
/// * `state` - Shared application state
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/",
            get(handlers::index::get_index).post(handlers::index::post_index),
        )
        .route(
            "/wiki/create/",
            get(handlers::create::get_create).post(handlers::create::post_create),
        )
        .route("/wiki/random/", get(handlers::random::get_random))
        .route(
            "/wiki/edit/",
            get(handlers::edit::get_edit).post(handlers::edit::post_edit),
        )
        .route(
            "/wiki/{title}",
            get(handlers::entry::get_entry).post(handlers::entry::post_entry),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(security::csp_layer())
                .layer(security::content_type_options_layer())
                .layer(security::frame_options_layer()),
        )
        .with_state(state)
}

//! Application state.
//!
//! Shared state for all request handlers.

use wiki_site::Wiki;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Entry resolver over the configured storage.
    pub(crate) wiki: Wiki,
    /// Application version for cache invalidation.
    pub(crate) version: String,
}

//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use wiki_site::WikiError;
use wiki_storage::{StorageError, StorageErrorKind};

use crate::views;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ServerError {
    /// A required form or query field was missing or blank.
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// Resolution failed in the entry store.
    #[error(transparent)]
    Wiki(#[from] WikiError),
}

impl ServerError {
    fn storage(&self) -> Option<&StorageError> {
        match self {
            Self::Wiki(WikiError::Storage(e)) => Some(e),
            Self::MissingField(_) => None,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match (&self, self.storage()) {
            (Self::MissingField(field), _) => (
                StatusCode::BAD_REQUEST,
                format!("The {field} field is required."),
            ),
            (_, Some(e)) if e.kind() == StorageErrorKind::InvalidTitle => {
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            _ => {
                tracing::error!(error = %self, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "The wiki could not complete this request.".to_owned(),
                )
            }
        };

        (status, Html(views::error_page(status, &message))).into_response()
    }
}

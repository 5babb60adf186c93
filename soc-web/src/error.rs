use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use soc_db::DbError;
use thiserror::Error;

use crate::settings::SettingsError;

/// Errors surfaced at the request or startup boundary.
#[derive(Debug, Error)]
pub enum WebError {
    /// Database open, query, or coercion failure
    #[error(transparent)]
    Database(#[from] DbError),

    /// Route matched but the page name is not one we serve
    #[error("Page not found: {0}")]
    PageNotFound(String),

    /// Presentation layer failed to produce output
    #[error("Render error: {0}")]
    Render(String),

    /// Blocking database task panicked or was cancelled
    #[error("Worker error: {0}")]
    Worker(String),

    /// Settings file could not be read
    #[error("Config error: {0}")]
    Config(#[from] SettingsError),

    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl WebError {
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn worker(msg: impl Into<String>) -> Self {
        Self::Worker(msg.into())
    }

    /// HTTP status for this error. Only a missing study or page is the
    /// client's problem; everything else, including a missing database file,
    /// is a server fault.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Database(DbError::StudyNotFound { .. }) | Self::PageNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("{self}");
        } else {
            log::info!("{self}");
        }
        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.to_string(),
        )
            .into_response()
    }
}

use std::fmt::Debug;
use std::fmt::Display;

use axum::response::Html;
use axum::{http::StatusCode, response::IntoResponse};

/// Failures of the backing store. Never retried here.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database pool: {0}")]
    Pool(#[from] diesel_async::pooled_connection::deadpool::PoolError),
    #[error("database query: {0}")]
    Query(#[from] diesel::result::Error),
    #[error("database connection: {0}")]
    Connection(#[from] diesel::ConnectionError),
    #[error("migration: {0}")]
    Migration(Box<dyn std::error::Error + Send + Sync>),
}

/// Input rejected before any store call.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("page size must be between 1 and {max}, got {got}")]
    PageSize { got: i64, max: i64 },
    #[error("unreadable upload: {0}")]
    Upload(String),
    #[error("invalid form field `{0}`")]
    Field(&'static str),
}

#[derive(Debug, thiserror::Error)]
pub enum BlogError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct AppError {
    pub status: StatusCode,
    pub inner: anyhow::Error,
}

impl AppError {
    pub fn not_found(what: impl Display) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            inner: anyhow::anyhow!("{what} not found"),
        }
    }

    fn status(&self) -> StatusCode {
        let invalid = self.inner.downcast_ref::<ValidationError>().is_some()
            || matches!(
                self.inner.downcast_ref::<BlogError>(),
                Some(BlogError::Validation(_))
            );
        if invalid {
            StatusCode::BAD_REQUEST
        } else {
            self.status
        }
    }
}

// Tell axum how to convert `AppError` into a response.
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = ?self.inner, "request failed");
        }
        let message = if status.is_server_error() {
            format!("Something went wrong: {}", self.inner)
        } else {
            self.inner.to_string()
        };
        (status, Html(message)).into_response()
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.inner, f)
    }
}

impl Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(&self.inner, f)
    }
}

// This enables using `?` on functions that return `Result<_, anyhow::Error>` to turn them into
// `Result<_, AppError>`. That way you don't need to do that manually.
impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            inner: err.into(),
        }
    }
}

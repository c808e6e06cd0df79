//! Page-level error boundary.
//!
//! A missing collection renders the 404 page. Any other failure is logged
//! with its error code and degrades to the generic failure page.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use tracing::{info, warn};

use crate::content::ContentError;
use crate::error::ErrorCode;
use crate::pages::status_page;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("collection not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Content(#[from] ContentError),
}

impl ErrorCode for AppError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "E_NOT_FOUND",
            Self::Content(e) => e.error_code(),
        }
    }

    fn retryable(&self) -> bool {
        match self {
            Self::NotFound(_) => false,
            Self::Content(e) => e.retryable(),
        }
    }
}

pub(crate) fn app_error_to_status(err: &AppError) -> StatusCode {
    match err {
        AppError::NotFound(_) => StatusCode::NOT_FOUND,
        AppError::Content(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = app_error_to_status(&self);
        let body = match &self {
            Self::NotFound(slug) => {
                info!(%slug, "page: collection not found");
                status_page::not_found()
            }
            Self::Content(e) => {
                warn!(error = %e, code = e.error_code(), retryable = e.retryable(), "page: content query failed");
                status_page::failure()
            }
        };
        (status, Html(body)).into_response()
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;

//! Read-only collection metadata from the headless CMS.
//!
//! DESIGN
//! ======
//! Pages only ever read collections, so the store exposes two queries and no
//! write path. `ContentStore` is the seam route handlers depend on; the
//! Sanity HTTP client is the production implementation and tests swap in an
//! in-memory store.

pub mod image;
pub mod sanity;
pub mod types;

use crate::error::ErrorCode;
use types::Collection;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by content store queries.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// The HTTP request to the content store failed.
    #[error("content request failed: {0}")]
    Request(String),

    /// The content store returned a non-success HTTP status.
    #[error("content response error: status {status}")]
    Response { status: u16, body: String },

    /// The response body could not be deserialized.
    #[error("content response parse failed: {0}")]
    Parse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl ErrorCode for ContentError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Request(_) => "E_CONTENT_REQUEST",
            Self::Response { .. } => "E_CONTENT_RESPONSE",
            Self::Parse(_) => "E_CONTENT_PARSE",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Request(_) | Self::Response { status: 429 | 500..=599, .. })
    }
}

// =============================================================================
// CONTENT STORE TRAIT
// =============================================================================

/// Read-only access to collection documents. Enables mocking in tests.
#[async_trait::async_trait]
pub trait ContentStore: Send + Sync {
    /// Fetch every published collection.
    ///
    /// # Errors
    ///
    /// Returns a [`ContentError`] if the query fails or the result is malformed.
    async fn list_collections(&self) -> Result<Vec<Collection>, ContentError>;

    /// Fetch the collection whose slug matches, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`ContentError`] if the query fails or the result is malformed.
    async fn collection_by_slug(&self, slug: &str) -> Result<Option<Collection>, ContentError>;
}

//! Shared error plumbing.
//!
//! Every module owns its own `thiserror` enum. `ErrorCode` gives each variant
//! a grepable code for structured logs and the JSON status endpoint.

/// Grepable error code and retryable flag for structured error reporting.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

//! Error types for the task client and its screens.

use reqwest::StatusCode;
use thiserror::Error;

/// Failures of a backend call. Transport and server errors are not
/// distinguished further; only the message reaches the user.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("server responded with {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// The task has not been persisted yet
    #[error("task has no id")]
    MissingId,
}

/// Input rejected before any request is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Enter a title")]
    EmptyTitle,
}

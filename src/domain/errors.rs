//! Error taxonomy of the shortening core.
//!
//! These errors are transport-agnostic; [`crate::error::AppError`] maps them
//! onto HTTP responses.

use thiserror::Error;

/// Failures reported by a [`crate::domain::repositories::LinkRepository`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The insert hit the unique constraint on `code`.
    #[error("short code already exists")]
    UniqueViolation,

    /// The addressed link does not exist.
    #[error("link not found")]
    NotFound,

    /// Transient persistence failure.
    #[error("link store unavailable: {0}")]
    Unavailable(String),
}

/// Failures of [`crate::application::services::LinkService::shorten`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShortenError {
    #[error("target URL must not be empty")]
    EmptyTarget,

    #[error("invalid custom code: {0}")]
    InvalidCode(String),

    /// The caller-supplied custom code is already taken.
    #[error("code '{0}' is already in use")]
    CodeConflict(String),

    /// The collision-retry budget ran out, even after length escalation.
    #[error("could not allocate a unique code after {attempts} attempts")]
    AllocationExhausted { attempts: usize },

    #[error("link store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("deadline exceeded while shortening")]
    DeadlineExceeded,
}

/// Failures of [`crate::application::services::RedirectService::resolve`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("no link with code '{0}'")]
    NotFound(String),

    #[error("link store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("deadline exceeded while resolving")]
    DeadlineExceeded,
}

impl From<StoreError> for ShortenError {
    fn from(err: StoreError) -> Self {
        Self::StoreUnavailable(err.to_string())
    }
}

impl From<StoreError> for ResolveError {
    fn from(err: StoreError) -> Self {
        Self::StoreUnavailable(err.to_string())
    }
}

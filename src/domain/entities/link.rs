//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A stored mapping between a short code and its target URL.
///
/// `code` and `target` never change after insert; `visits` only grows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: i64,
    pub code: String,
    pub target: String,
    /// `true` when the code was supplied by the caller rather than generated.
    pub is_custom: bool,
    pub visits: u64,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        code: String,
        target: String,
        is_custom: bool,
        visits: u64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            code,
            target,
            is_custom,
            visits,
            created_at,
        }
    }
}

/// Input data for inserting a new link.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub code: String,
    pub target: String,
    pub is_custom: bool,
    pub created_at: DateTime<Utc>,
}

//! DTOs for link detail endpoint.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::Link;

/// Stored link as exposed by `GET /api/links/{code}`.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub code: String,
    pub short_url: String,
    pub target: String,
    pub is_custom: bool,
    pub visits: u64,
    pub created_at: DateTime<Utc>,
}

impl LinkResponse {
    pub fn from_link(link: Link, short_url: String) -> Self {
        Self {
            code: link.code,
            short_url,
            target: link.target,
            is_custom: link.is_custom,
            visits: link.visits,
            created_at: link.created_at,
        }
    }
}

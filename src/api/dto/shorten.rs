//! DTOs for link shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a single URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The target URL. Stored verbatim after trimming.
    #[validate(length(min = 1, max = 2048, message = "URL must be 1-2048 characters"))]
    pub url: String,

    /// Optional custom short code. Character rules are enforced by the
    /// service so the API and the HTML form share them.
    #[validate(length(min = 1, max = 64))]
    pub custom_code: Option<String>,
}

/// Successful shortening result.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub code: String,
    pub short_url: String,
    pub target: String,
    /// `false` when an existing link was reused.
    pub created: bool,
}

//! DTOs for the `/health` endpoint.

use serde::Serialize;

/// Body of `/health`. `status` is `"healthy"` when the link store answers,
/// `"degraded"` otherwise.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub checks: HealthChecks,
}

/// The link store is the only dependency that gets checked.
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub database: CheckStatus,
}

/// Outcome of pinging the link store: `"ok"` or `"error"`.
#[derive(Debug, Serialize)]
pub struct CheckStatus {
    pub status: String,

    /// Short human-readable note. Never carries driver error text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

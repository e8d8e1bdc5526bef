//! DTOs for the metrics endpoint.

use serde::Serialize;

use crate::infrastructure::metrics::MetricsSnapshot;

/// Event counters since startup plus the stored link total.
#[derive(Debug, Serialize)]
pub struct MetricsResponse {
    #[serde(flatten)]
    pub counters: MetricsSnapshot,
    /// `None` when the store could not be queried.
    pub total_links: Option<i64>,
}

//! Handler for the metrics endpoint.

use axum::{Json, extract::State};

use crate::api::dto::metrics::MetricsResponse;
use crate::domain::repositories::LinkRepository;
use crate::state::AppState;

/// Returns event counters collected since startup.
///
/// # Endpoint
///
/// `GET /metrics`
///
/// `total_links` is `null` if the store cannot be counted; the counters are
/// still returned.
pub async fn metrics_handler(State(state): State<AppState>) -> Json<MetricsResponse> {
    let total_links = match state.link_repository.count().await {
        Ok(count) => Some(count),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to count links");
            None
        }
    };

    Json(MetricsResponse {
        counters: state.metrics.snapshot(),
        total_links,
    })
}

//! Handler for link detail lookups.

use axum::{
    Json,
    extract::{Path, State},
    http::HeaderMap,
};
use serde_json::json;

use crate::api::dto::link::LinkResponse;
use crate::application::services::link_service::short_url;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::public_base::resolve_base_url;

/// Returns a stored link with its visit count.
///
/// # Endpoint
///
/// `GET /api/links/{code}`
///
/// Unlike the redirect, this does not count as a visit.
///
/// # Errors
///
/// - 404 if no link has this code
/// - 503 if the store is unavailable
pub async fn link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state
        .link_service
        .get_link(&code)
        .await?
        .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))?;

    let base = resolve_base_url(state.base_url.as_deref(), &headers);
    let url = short_url(&base, &link.code);

    Ok(Json(LinkResponse::from_link(link, url)))
}

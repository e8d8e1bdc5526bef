//! Handler for QR code images.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, header},
    response::IntoResponse,
};
use serde_json::json;

use crate::application::services::link_service::short_url;
use crate::error::AppError;
use crate::infrastructure::qr;
use crate::state::AppState;
use crate::utils::public_base::resolve_base_url;

/// Renders the short URL of `code` as an SVG QR code.
///
/// # Endpoint
///
/// `GET /qr/{code}`
///
/// # Errors
///
/// - 404 if no link has this code
/// - 503 if the store is unavailable
pub async fn qr_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let link = state
        .link_service
        .get_link(&code)
        .await?
        .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))?;

    let base = resolve_base_url(state.base_url.as_deref(), &headers);
    let svg = qr::render_svg(&short_url(&base, &link.code)).map_err(|e| {
        tracing::error!(code = %link.code, error = %e, "QR rendering failed");
        AppError::internal("Failed to render QR code", json!({}))
    })?;

    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg))
}

//! Handler for link shortening endpoint.

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::application::services::link_service::short_url;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::public_base::resolve_base_url;

/// Creates a short link for a target URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com", "custom_code": "promo" }
/// ```
///
/// `custom_code` is optional. Without it, an existing auto-generated link
/// for the same URL may be returned instead of a new one.
///
/// # Response
///
/// `201 Created` for a new link, `200 OK` when an existing one is reused:
///
/// ```json
/// {
///   "code": "promo",
///   "short_url": "https://s.example.com/promo",
///   "target": "https://example.com",
///   "created": true
/// }
/// ```
///
/// # Errors
///
/// - 400 if the URL is empty or the custom code is invalid
/// - 409 if the custom code is already taken
/// - 500 if no free code could be allocated
/// - 503 if the store is unavailable or the request timed out
pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    payload.validate()?;

    let allocation = state
        .link_service
        .shorten(&payload.url, payload.custom_code.as_deref())
        .await?;

    let base = resolve_base_url(state.base_url.as_deref(), &headers);
    let status = if allocation.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((
        status,
        Json(ShortenResponse {
            short_url: short_url(&base, &allocation.link.code),
            code: allocation.link.code,
            target: allocation.link.target,
            created: allocation.created,
        }),
    ))
}

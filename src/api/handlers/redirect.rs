//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};

use crate::domain::errors::ResolveError;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::handlers::NotFoundTemplate;

/// Redirects a short code to its target URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Look up the code
/// 2. Count the visit (a failed count does not block the redirect)
/// 3. Return 307 Temporary Redirect
///
/// # Errors
///
/// Unknown codes get a 404 HTML page, since this route is hit by browsers.
/// Store failures and timeouts return 503 with a JSON error body.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    match state.redirect_service.resolve(&code).await {
        Ok(target) => Ok(Redirect::temporary(&target).into_response()),
        Err(ResolveError::NotFound(code)) => {
            Ok((StatusCode::NOT_FOUND, NotFoundTemplate { code }).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

//! Web page route configuration.

use crate::state::AppState;
use crate::web::handlers::{home_handler, home_submit_handler};
use axum::{Router, routing::get};

/// HTML routes.
///
/// # Endpoints
///
/// - `GET  /` - Shortening form
/// - `POST /` - Form submission; renders the result with a QR code
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(home_handler).post(home_submit_handler))
}

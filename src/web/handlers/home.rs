//! Home page: the shortening form.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use serde::Deserialize;

use crate::application::services::link_service::short_url;
use crate::domain::errors::ShortenError;
use crate::error::AppError;
use crate::infrastructure::qr;
use crate::state::AppState;
use crate::utils::public_base::resolve_base_url;

/// Fields posted by the form. Empty inputs arrive as empty strings.
#[derive(Debug, Deserialize)]
pub struct ShortenForm {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub custom_code: String,
}

/// A link to show under the form.
pub struct ShortenedLink {
    pub short_url: String,
    pub target: String,
    pub created: bool,
    /// `data:` URI of the QR code, if rendering succeeded.
    pub qr_data: Option<String>,
}

/// Template for the home page.
///
/// Renders `templates/index.html` with the form (refilled after a submit),
/// and either the shortened link or an error message.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub url: String,
    pub custom_code: String,
    pub link: Option<ShortenedLink>,
    pub error: Option<String>,
}

/// Renders the empty form.
///
/// # Endpoint
///
/// `GET /`
pub async fn home_handler() -> impl IntoResponse {
    IndexTemplate {
        url: String::new(),
        custom_code: String::new(),
        link: None,
        error: None,
    }
}

/// Shortens the submitted URL and renders the result.
///
/// # Endpoint
///
/// `POST /`
///
/// Errors are rendered into the page with the status the JSON API would
/// use for the same failure.
pub async fn home_submit_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<ShortenForm>,
) -> impl IntoResponse {
    let custom_code = Some(form.custom_code.trim()).filter(|c| !c.is_empty());

    match state.link_service.shorten(&form.url, custom_code).await {
        Ok(allocation) => {
            let base = resolve_base_url(state.base_url.as_deref(), &headers);
            let url = short_url(&base, &allocation.link.code);

            let qr_data = match qr::render_data_uri(&url) {
                Ok(data) => Some(data),
                Err(e) => {
                    tracing::warn!(code = %allocation.link.code, error = %e, "QR rendering failed");
                    None
                }
            };

            let page = IndexTemplate {
                url: String::new(),
                custom_code: String::new(),
                link: Some(ShortenedLink {
                    short_url: url,
                    target: allocation.link.target,
                    created: allocation.created,
                    qr_data,
                }),
                error: None,
            };

            (StatusCode::OK, page)
        }
        Err(e) => {
            // Store errors carry backend detail; show the generic API message.
            let message = match &e {
                ShortenError::StoreUnavailable(_) | ShortenError::DeadlineExceeded => None,
                _ => Some(e.to_string()),
            };
            let app_error = AppError::from(e);
            let status = app_error.status();
            let message = message.unwrap_or_else(|| app_error.to_error_info().message);

            let page = IndexTemplate {
                url: form.url,
                custom_code: form.custom_code,
                link: None,
                error: Some(message),
            };

            (status, page)
        }
    }
}

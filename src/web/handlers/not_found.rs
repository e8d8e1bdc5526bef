//! Page shown for unknown short codes.

use askama::Template;
use askama_web::WebTemplate;

/// Renders `templates/not_found.html`.
#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub code: String,
}

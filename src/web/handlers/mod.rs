//! HTML template rendering handlers.

mod home;
mod not_found;

pub use home::{home_handler, home_submit_handler};
pub use not_found::NotFoundTemplate;

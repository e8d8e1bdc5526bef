//! # URL Shortener
//!
//! A small URL shortening service built with Axum and SQLite.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Entities, errors, events and the link store port
//! - **Application Layer** ([`application`]) - Code allocation and redirect resolution
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite storage, metrics, QR rendering
//! - **API Layer** ([`api`]) - JSON handlers, DTOs and middleware
//! - **Web Layer** ([`web`]) - HTML form and error pages
//!
//! ## Features
//!
//! - Random codes from a configurable alphabet, or caller-chosen custom codes
//! - Collision-safe allocation: the store's unique constraint is the arbiter,
//!   with bounded retries and code length escalation
//! - Optional reuse of existing links for a repeated target URL
//! - Atomic visit counting on redirect
//! - QR codes for every short link
//!
//! ## Quick Start
//!
//! ```bash
//! export DATABASE_URL="sqlite://data/links.db"   # Optional
//! export BASE_URL="https://s.example.com"        # Optional
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;
pub mod web;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{Allocation, LinkService, RedirectService};
    pub use crate::domain::entities::{Link, NewLink};
    pub use crate::domain::errors::{ResolveError, ShortenError, StoreError};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}

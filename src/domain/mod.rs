//! Domain layer containing business entities and ports.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`errors`] - Error taxonomy of the shortening core
//! - [`events`] - Domain events and the observer hook
//! - [`clock`] - Time source abstraction
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Business logic lives in [`crate::application::services`].

pub mod clock;
pub mod entities;
pub mod errors;
pub mod events;
pub mod repositories;

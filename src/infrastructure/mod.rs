//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - SQLite repository implementations
//! - [`metrics`] - Event observer feeding operational counters
//! - [`qr`] - QR code rendering

pub mod metrics;
pub mod persistence;
pub mod qr;

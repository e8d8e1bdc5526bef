//! Core domain entities.
//!
//! Entities are plain data structures without business logic. Creation input
//! lives in a separate struct ([`NewLink`]) so that store-assigned fields
//! (`id`, `visits`) never have to be invented by callers.

pub mod link;

pub use link::{Link, NewLink};

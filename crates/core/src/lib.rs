//! Shared domain types for the nearby backend.
//!
//! This crate is intentionally free of I/O dependencies: it holds the
//! type aliases, the domain error taxonomy, and the role hierarchy
//! that every other crate builds on.

pub mod error;
pub mod roles;
pub mod types;

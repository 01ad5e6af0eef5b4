//! Distance-maintenance subsystem.
//!
//! Keeps the derived Home x Location walking-time matrix synchronized
//! with the entity tables as homes, locations and addresses change,
//! while tolerating partial failures from the geo provider:
//!
//! - [`address_store`] persists addresses with provider-resolved
//!   coordinates; resolution failure is a hard error there.
//! - [`distance_matrix`] materializes and recomputes matrix rows;
//!   a pair the provider cannot answer is skipped, never fatal.
//! - [`home_registry`] / [`location_registry`] drive the
//!   address -> entity -> distances lifecycle sequence.

pub mod address_store;
pub mod distance_matrix;
pub mod error;
pub mod home_registry;
pub mod location_registry;

pub use error::{Error, Result};

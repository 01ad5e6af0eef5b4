//! Geocoding and routing provider abstraction.
//!
//! The rest of the system never talks to the routing service directly:
//! it goes through the [`provider::GeoProvider`] trait, which cleanly
//! separates "the provider has no answer" ([`provider::GeoError::NotFound`])
//! from "the provider is down" ([`provider::GeoError::Unavailable`]).
//! Callers decide per call site whether an outage is retried, skipped,
//! or fatal.
//!
//! [`ors::OpenRouteServiceClient`] is the production implementation;
//! tests inject deterministic doubles of the trait instead.

pub mod ors;
pub mod provider;
pub mod retry;

pub use provider::{Coordinates, GeoError, GeoProvider};

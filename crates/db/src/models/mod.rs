//! Row models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - Read/detail shapes where the API exposes a composed view

pub mod address;
pub mod distance;
pub mod home;
pub mod location;
pub mod user;

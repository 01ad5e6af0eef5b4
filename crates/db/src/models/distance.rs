//! Distance matrix row model.

use serde::Serialize;
use sqlx::FromRow;

use nearby_core::types::{DbId, Timestamp};

/// A row from the `distances` table: one directed walking-time record
/// from a home to a location. Unique per (home, location) pair.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Distance {
    pub id: DbId,
    pub source_home_id: DbId,
    pub destination_location_id: DbId,
    pub walking_distance_minutes: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One side of a (home, location) pair as the matrix sees it: just the
/// entity id and its resolved coordinates.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct Endpoint {
    pub id: DbId,
    pub longitude: f64,
    pub latitude: f64,
}

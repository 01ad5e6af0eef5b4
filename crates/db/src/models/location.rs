//! Location entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use nearby_core::types::{DbId, Timestamp};

use crate::models::address::{Address, CreateAddress};

/// A row from the `locations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Location {
    pub id: DbId,
    pub name: String,
    pub summary: Option<String>,
    pub description: String,
    pub price_estimate_min: i32,
    pub price_estimate_max: i32,
    pub address_id: DbId,
    pub creation_user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or replacing a location.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateLocation {
    #[validate(length(min = 1))]
    pub name: String,
    pub summary: Option<String>,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(range(min = 0))]
    pub price_estimate_min: i32,
    #[validate(range(min = 0))]
    pub price_estimate_max: i32,
    #[validate(nested)]
    pub address: CreateAddress,
}

/// API-facing shape of a location with its address embedded.
#[derive(Debug, Clone, Serialize)]
pub struct LocationDetail {
    pub id: DbId,
    pub name: String,
    pub summary: Option<String>,
    pub description: String,
    pub price_estimate_min: i32,
    pub price_estimate_max: i32,
    pub address: Address,
    pub creation_user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl LocationDetail {
    pub fn from_parts(location: Location, address: Address) -> Self {
        Self {
            id: location.id,
            name: location.name,
            summary: location.summary,
            description: location.description,
            price_estimate_min: location.price_estimate_min,
            price_estimate_max: location.price_estimate_max,
            address,
            creation_user_id: location.creation_user_id,
            created_at: location.created_at,
            updated_at: location.updated_at,
        }
    }
}

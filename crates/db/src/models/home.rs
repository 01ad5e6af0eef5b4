//! Home entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use nearby_core::types::{DbId, Timestamp};

use crate::models::address::{Address, CreateAddress};

/// A row from the `homes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Home {
    pub id: DbId,
    pub name: String,
    pub address_id: DbId,
    pub creation_user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or replacing a home. The nested address is created
/// (or on update, re-resolved and overwritten) alongside the entity.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateHome {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(nested)]
    pub address: CreateAddress,
}

/// API-facing shape of a home with its address embedded.
#[derive(Debug, Clone, Serialize)]
pub struct HomeDetail {
    pub id: DbId,
    pub name: String,
    pub address: Address,
    pub creation_user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl HomeDetail {
    pub fn from_parts(home: Home, address: Address) -> Self {
        Self {
            id: home.id,
            name: home.name,
            address,
            creation_user_id: home.creation_user_id,
            created_at: home.created_at,
            updated_at: home.updated_at,
        }
    }
}

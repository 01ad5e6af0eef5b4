//! Repository for the `addresses` table.

use sqlx::PgPool;
use nearby_core::types::DbId;

use crate::models::address::{Address, CreateAddress};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, street, city, postal_code, country, latitude, longitude, \
    created_at, updated_at";

/// Provides CRUD operations for addresses.
///
/// Coordinates are always passed in explicitly: resolving them from
/// the textual fields is the address store's job, not the repository's.
pub struct AddressRepo;

impl AddressRepo {
    /// Insert a new address with resolved coordinates.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAddress,
        longitude: f64,
        latitude: f64,
    ) -> Result<Address, sqlx::Error> {
        let query = format!(
            "INSERT INTO addresses (street, city, postal_code, country, latitude, longitude)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Address>(&query)
            .bind(&input.street)
            .bind(&input.city)
            .bind(&input.postal_code)
            .bind(&input.country)
            .bind(latitude)
            .bind(longitude)
            .fetch_one(pool)
            .await
    }

    /// Find an address by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Address>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM addresses WHERE id = $1");
        sqlx::query_as::<_, Address>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite every field of an address, coordinates included.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn replace(
        pool: &PgPool,
        id: DbId,
        input: &CreateAddress,
        longitude: f64,
        latitude: f64,
    ) -> Result<Option<Address>, sqlx::Error> {
        let query = format!(
            "UPDATE addresses SET
                street = $2, city = $3, postal_code = $4, country = $5,
                latitude = $6, longitude = $7, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Address>(&query)
            .bind(id)
            .bind(&input.street)
            .bind(&input.city)
            .bind(&input.postal_code)
            .bind(&input.country)
            .bind(latitude)
            .bind(longitude)
            .fetch_optional(pool)
            .await
    }
}

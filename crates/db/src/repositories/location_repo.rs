//! Repository for the `locations` table.

use sqlx::PgPool;
use nearby_core::types::DbId;

use crate::models::distance::Endpoint;
use crate::models::location::{CreateLocation, Location};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, summary, description, price_estimate_min, price_estimate_max, \
    address_id, creation_user_id, created_at, updated_at";

/// Provides CRUD operations for locations.
pub struct LocationRepo;

impl LocationRepo {
    /// Insert a new location referencing an already-persisted address.
    pub async fn create(
        pool: &PgPool,
        input: &CreateLocation,
        address_id: DbId,
        creation_user_id: DbId,
    ) -> Result<Location, sqlx::Error> {
        let query = format!(
            "INSERT INTO locations
                (name, summary, description, price_estimate_min, price_estimate_max,
                 address_id, creation_user_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Location>(&query)
            .bind(&input.name)
            .bind(&input.summary)
            .bind(&input.description)
            .bind(input.price_estimate_min)
            .bind(input.price_estimate_max)
            .bind(address_id)
            .bind(creation_user_id)
            .fetch_one(pool)
            .await
    }

    /// Find a location by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Location>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM locations WHERE id = $1");
        sqlx::query_as::<_, Location>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all locations, ordered by creation time ascending.
    pub async fn list(pool: &PgPool) -> Result<Vec<Location>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM locations ORDER BY created_at ASC");
        sqlx::query_as::<_, Location>(&query).fetch_all(pool).await
    }

    /// Update the scalar fields of a location (everything except the
    /// address, which the address store replaces separately).
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_fields(
        pool: &PgPool,
        id: DbId,
        input: &CreateLocation,
    ) -> Result<Option<Location>, sqlx::Error> {
        let query = format!(
            "UPDATE locations SET
                name = $2, summary = $3, description = $4,
                price_estimate_min = $5, price_estimate_max = $6, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Location>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.summary)
            .bind(&input.description)
            .bind(input.price_estimate_min)
            .bind(input.price_estimate_max)
            .fetch_optional(pool)
            .await
    }

    /// Delete a location together with its owned address, in one
    /// transaction. Distance rows cascade via the FK on `distances`.
    ///
    /// Returns `true` if a location row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let address_id: Option<(DbId,)> =
            sqlx::query_as("DELETE FROM locations WHERE id = $1 RETURNING address_id")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        let Some((address_id,)) = address_id else {
            tx.rollback().await?;
            return Ok(false);
        };

        sqlx::query("DELETE FROM addresses WHERE id = $1")
            .bind(address_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }

    /// All locations as matrix endpoints: id plus resolved coordinates.
    pub async fn list_endpoints(pool: &PgPool) -> Result<Vec<Endpoint>, sqlx::Error> {
        sqlx::query_as::<_, Endpoint>(
            "SELECT l.id, a.longitude, a.latitude
             FROM locations l
             JOIN addresses a ON a.id = l.address_id
             ORDER BY l.id ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// A single location as a matrix endpoint, or `None` if it does not exist.
    pub async fn endpoint(pool: &PgPool, id: DbId) -> Result<Option<Endpoint>, sqlx::Error> {
        sqlx::query_as::<_, Endpoint>(
            "SELECT l.id, a.longitude, a.latitude
             FROM locations l
             JOIN addresses a ON a.id = l.address_id
             WHERE l.id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}

//! Repository for the `homes` table.

use sqlx::PgPool;
use nearby_core::types::DbId;

use crate::models::distance::Endpoint;
use crate::models::home::Home;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, address_id, creation_user_id, created_at, updated_at";

/// Provides CRUD operations for homes.
pub struct HomeRepo;

impl HomeRepo {
    /// Insert a new home referencing an already-persisted address.
    pub async fn create(
        pool: &PgPool,
        name: &str,
        address_id: DbId,
        creation_user_id: DbId,
    ) -> Result<Home, sqlx::Error> {
        let query = format!(
            "INSERT INTO homes (name, address_id, creation_user_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Home>(&query)
            .bind(name)
            .bind(address_id)
            .bind(creation_user_id)
            .fetch_one(pool)
            .await
    }

    /// Find a home by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Home>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM homes WHERE id = $1");
        sqlx::query_as::<_, Home>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all homes, ordered by creation time ascending.
    pub async fn list(pool: &PgPool) -> Result<Vec<Home>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM homes ORDER BY created_at ASC");
        sqlx::query_as::<_, Home>(&query).fetch_all(pool).await
    }

    /// Whether a home with the given ID exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM homes WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// Rename a home. Returns `None` if no row with the given `id` exists.
    pub async fn rename(pool: &PgPool, id: DbId, name: &str) -> Result<Option<Home>, sqlx::Error> {
        let query = format!(
            "UPDATE homes SET name = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Home>(&query)
            .bind(id)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a home together with its owned address, in one
    /// transaction. Distance rows cascade via the FK on `distances`.
    ///
    /// Returns `true` if a home row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let address_id: Option<(DbId,)> =
            sqlx::query_as("DELETE FROM homes WHERE id = $1 RETURNING address_id")
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

    /// All homes as matrix endpoints: id plus resolved coordinates.
    pub async fn list_endpoints(pool: &PgPool) -> Result<Vec<Endpoint>, sqlx::Error> {
        sqlx::query_as::<_, Endpoint>(
            "SELECT h.id, a.longitude, a.latitude
             FROM homes h
             JOIN addresses a ON a.id = h.address_id
             ORDER BY h.id ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// A single home as a matrix endpoint, or `None` if it does not exist.
    pub async fn endpoint(pool: &PgPool, id: DbId) -> Result<Option<Endpoint>, sqlx::Error> {
        sqlx::query_as::<_, Endpoint>(
            "SELECT h.id, a.longitude, a.latitude
             FROM homes h
             JOIN addresses a ON a.id = h.address_id
             WHERE h.id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}

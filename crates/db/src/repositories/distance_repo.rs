//! Repository for the `distances` table.

use sqlx::PgPool;
use nearby_core::types::DbId;

use crate::models::distance::Distance;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, source_home_id, destination_location_id, \
    walking_distance_minutes, created_at, updated_at";

/// Provides matrix-row operations for distances.
///
/// There is deliberately no plain `insert`: all writes go through
/// [`DistanceRepo::upsert`] so that concurrent materializations of the
/// same pair converge on one row instead of erroring or duplicating.
pub struct DistanceRepo;

impl DistanceRepo {
    /// Insert or update the row for a (home, location) pair.
    pub async fn upsert(
        pool: &PgPool,
        source_home_id: DbId,
        destination_location_id: DbId,
        walking_distance_minutes: i32,
    ) -> Result<Distance, sqlx::Error> {
        let query = format!(
            "INSERT INTO distances
                (source_home_id, destination_location_id, walking_distance_minutes)
             VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_distances_home_location
             DO UPDATE SET
                walking_distance_minutes = EXCLUDED.walking_distance_minutes,
                updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Distance>(&query)
            .bind(source_home_id)
            .bind(destination_location_id)
            .bind(walking_distance_minutes)
            .fetch_one(pool)
            .await
    }

    /// All distances originating from a home, ordered by destination.
    pub async fn list_by_home(pool: &PgPool, home_id: DbId) -> Result<Vec<Distance>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM distances
             WHERE source_home_id = $1
             ORDER BY destination_location_id ASC"
        );
        sqlx::query_as::<_, Distance>(&query)
            .bind(home_id)
            .fetch_all(pool)
            .await
    }

    /// All distances targeting a location, ordered by source home.
    pub async fn list_by_location(
        pool: &PgPool,
        location_id: DbId,
    ) -> Result<Vec<Distance>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM distances
             WHERE destination_location_id = $1
             ORDER BY source_home_id ASC"
        );
        sqlx::query_as::<_, Distance>(&query)
            .bind(location_id)
            .fetch_all(pool)
            .await
    }

    /// Delete every distance originating from a home. Returns the
    /// number of rows removed.
    pub async fn delete_by_home(pool: &PgPool, home_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM distances WHERE source_home_id = $1")
            .bind(home_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Delete every distance targeting a location. Returns the number
    /// of rows removed.
    pub async fn delete_by_location(pool: &PgPool, location_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM distances WHERE destination_location_id = $1")
            .bind(location_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}

//! Repository for the `users` table.

use sqlx::PgPool;
use nearby_core::roles::Role;
use nearby_core::types::DbId;

use crate::models::user::User;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, hashed_password, role, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user with an already-hashed password.
    pub async fn create(
        pool: &PgPool,
        email: &str,
        hashed_password: &str,
        role: Role,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, hashed_password, role)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .bind(hashed_password)
            .bind(role.as_str())
            .fetch_one(pool)
            .await
    }

    /// Find a user by email (the login identifier).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List all users, ordered by creation time ascending.
    pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY created_at ASC");
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }

    /// Delete a user. Owned homes and locations cascade via FK; their
    /// owned address rows cannot (the FK points entity -> address), so
    /// they are removed explicitly in the same transaction.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let address_ids: Vec<(DbId,)> = sqlx::query_as(
            "SELECT address_id FROM homes WHERE creation_user_id = $1
             UNION ALL
             SELECT address_id FROM locations WHERE creation_user_id = $1",
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        // Entities are gone now, so the address rows are free to go.
        let address_ids: Vec<DbId> = address_ids.into_iter().map(|(id,)| id).collect();
        sqlx::query("DELETE FROM addresses WHERE id = ANY($1)")
            .bind(&address_ids)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}

//! User entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use nearby_core::types::{DbId, Timestamp};

/// A row from the `users` table. Never serialized to clients directly;
/// use [`UserRead`] for API responses.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: String,
    /// Argon2id hash in PHC string format.
    pub hashed_password: String,
    /// Role name; parse with `Role::from_str` for ordered comparisons.
    pub role: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Signup DTO. The password arrives in plaintext and is hashed before
/// it ever reaches a repository.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUser {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
}

/// API-facing user shape without credential material.
#[derive(Debug, Clone, Serialize)]
pub struct UserRead {
    pub id: DbId,
    pub email: String,
    pub role: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<User> for UserRead {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

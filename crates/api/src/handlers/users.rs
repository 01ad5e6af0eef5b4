//! Admin-only user management handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use nearby_core::error::CoreError;
use nearby_core::types::DbId;
use nearby_db::models::user::UserRead;
use nearby_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// GET /api/v1/users (admin only)
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
) -> AppResult<Json<Vec<UserRead>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(users.into_iter().map(UserRead::from).collect()))
}

/// DELETE /api/v1/users/{id} (admin only)
///
/// Takes the user's homes and locations (with their owned addresses)
/// and the entities' distance rows along.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = UserRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "User", id }))
    }
}

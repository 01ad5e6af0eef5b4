//! Handlers for the `/homes` resource.
//!
//! Create and update hold the request open for the full distance pass:
//! one provider call per existing location (see `nearby-matrix`).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use nearby_core::error::CoreError;
use nearby_core::types::DbId;
use nearby_db::models::distance::Distance;
use nearby_db::models::home::{CreateHome, HomeDetail};
use nearby_matrix::home_registry::HomeRegistry;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// GET /api/v1/homes
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<HomeDetail>>> {
    let homes = HomeRegistry::list(&state.pool).await?;
    Ok(Json(homes))
}

/// GET /api/v1/homes/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<HomeDetail>> {
    let home = HomeRegistry::get(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Home", id }))?;
    Ok(Json(home))
}

/// POST /api/v1/homes
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateHome>,
) -> AppResult<(StatusCode, Json<HomeDetail>)> {
    input.validate()?;
    let home = HomeRegistry::create(
        &state.pool,
        state.geo.as_ref(),
        &state.config.geo.retry,
        &input,
        user.user_id,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(home)))
}

/// PUT /api/v1/homes/{id}
pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<CreateHome>,
) -> AppResult<Json<HomeDetail>> {
    input.validate()?;
    let home = HomeRegistry::update(
        &state.pool,
        state.geo.as_ref(),
        &state.config.geo.retry,
        id,
        &input,
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound { entity: "Home", id }))?;
    Ok(Json(home))
}

/// DELETE /api/v1/homes/{id} (admin only)
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = HomeRegistry::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Home", id }))
    }
}

/// GET /api/v1/homes/{id}/distances
///
/// 404 only when the home itself is missing; a home with no resolved
/// pairs answers 200 with an empty list.
pub async fn distances(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<Distance>>> {
    let distances = HomeRegistry::distances(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Home", id }))?;
    Ok(Json(distances))
}

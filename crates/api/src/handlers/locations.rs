//! Handlers for the `/locations` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use nearby_core::error::CoreError;
use nearby_core::types::DbId;
use nearby_db::models::location::{CreateLocation, LocationDetail};
use nearby_matrix::location_registry::LocationRegistry;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// GET /api/v1/locations
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<LocationDetail>>> {
    let locations = LocationRegistry::list(&state.pool).await?;
    Ok(Json(locations))
}

/// GET /api/v1/locations/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<LocationDetail>> {
    let location = LocationRegistry::get(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Location",
            id,
        }))?;
    Ok(Json(location))
}

/// POST /api/v1/locations
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateLocation>,
) -> AppResult<(StatusCode, Json<LocationDetail>)> {
    input.validate()?;
    validate_price_range(&input)?;
    let location = LocationRegistry::create(
        &state.pool,
        state.geo.as_ref(),
        &state.config.geo.retry,
        &input,
        user.user_id,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(location)))
}

/// PUT /api/v1/locations/{id}
pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<CreateLocation>,
) -> AppResult<Json<LocationDetail>> {
    input.validate()?;
    validate_price_range(&input)?;
    let location = LocationRegistry::update(
        &state.pool,
        state.geo.as_ref(),
        &state.config.geo.retry,
        id,
        &input,
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Location",
        id,
    }))?;
    Ok(Json(location))
}

/// DELETE /api/v1/locations/{id} (admin only)
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = LocationRegistry::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Location",
            id,
        }))
    }
}

fn validate_price_range(input: &CreateLocation) -> Result<(), AppError> {
    if input.price_estimate_min > input.price_estimate_max {
        return Err(AppError::BadRequest(
            "price_estimate_min must not exceed price_estimate_max".into(),
        ));
    }
    Ok(())
}

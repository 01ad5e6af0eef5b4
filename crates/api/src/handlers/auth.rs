//! Signup and signin handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use nearby_core::error::CoreError;
use nearby_core::roles::Role;
use nearby_db::models::user::{CreateUser, UserRead};
use nearby_db::repositories::UserRepo;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Signin request payload.
#[derive(Debug, Deserialize)]
pub struct SignIn {
    pub email: String,
    pub password: String,
}

/// Bearer token response.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

/// POST /api/v1/auth/signup
///
/// New accounts always start with the `user` role; promotion is a
/// separate administrative concern.
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<CreateUser>,
) -> AppResult<(StatusCode, Json<UserRead>)> {
    input.validate()?;

    if UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Email already registered".into(),
        )));
    }

    let hashed = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;
    let user = UserRepo::create(&state.pool, &input.email, &hashed, Role::User).await?;

    tracing::info!(user_id = user.id, "User signed up");
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// POST /api/v1/auth/signin
///
/// The same 401 answers both unknown email and wrong password so the
/// endpoint does not leak which emails exist.
pub async fn signin(
    State(state): State<AppState>,
    Json(input): Json<SignIn>,
) -> AppResult<Json<TokenResponse>> {
    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Incorrect email or password".into()))
        })?;

    let valid = verify_password(&input.password, &user.hashed_password)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {e}")))?;
    if !valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Incorrect email or password".into(),
        )));
    }

    let token = generate_access_token(user.id, &user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    Ok(Json(TokenResponse {
        access_token: token,
        token_type: "bearer",
    }))
}

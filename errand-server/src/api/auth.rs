//! Registration and login

use axum::Json;
use axum::extract::State;
use shared::error::{AppError, ErrorCode};
use shared::models::{AuthResponse, LoginRequest, RegisterRequest};

use super::ApiResult;
use crate::auth::create_token;
use crate::db;
use crate::state::AppState;
use crate::util::{hash_password, verify_password};

const MIN_PASSWORD_LEN: usize = 6;

/// POST /api/auth/register — create user + empty wallet
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<AuthResponse> {
    let username = req.username.trim().to_string();
    if username.is_empty() || username.len() > 64 {
        return Err(AppError::validation("username must be 1-64 characters").into());
    }
    if req.password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::validation("password must be at least 6 characters").into());
    }

    if db::users::find_by_username(&state.pool, &username)
        .await?
        .is_some()
    {
        return Err(AppError::already_exists("username").into());
    }

    let hashed = hash_password(&req.password)
        .map_err(|e| AppError::internal(format!("password hashing failed: {e}")))?;

    let now = shared::util::now_millis();
    let user = db::users::create(&state.pool, &username, &hashed, now).await?;
    db::wallets::get_or_create(&state.pool, user.id, now).await?;

    let token = create_token(user.id, &user.username, &state.jwt_secret)
        .map_err(|e| AppError::internal(format!("token creation failed: {e}")))?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<AuthResponse> {
    let user = db::users::find_by_username(&state.pool, req.username.trim())
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::InvalidCredentials))?;

    if !verify_password(&req.password, &user.hashed_password) {
        return Err(AppError::new(ErrorCode::InvalidCredentials).into());
    }

    let token = create_token(user.id, &user.username, &state.jwt_secret)
        .map_err(|e| AppError::internal(format!("token creation failed: {e}")))?;

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

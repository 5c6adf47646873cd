//! Authentication Handlers
//!
//! Demo credential login and current user lookup

use std::time::Duration;

use axum::{Json, extract::State};

use crate::auth::{CurrentUser, verify_password};
use crate::core::ServerState;
use crate::db::repository::UserRepository;
use crate::security_log;
use crate::utils::validation::validate;
use crate::utils::{AppError, AppResult, ErrorCode};

use shared::client::{LoginRequest, LoginResponse, UserInfo};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 100;

/// Login handler
///
/// Authenticates demo credentials and returns a JWT token
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    validate(&req)?;

    let repo = UserRepository::new(state.store.clone());
    let user = repo.find_by_email(&req.email).await?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Unified error message to prevent email enumeration
    let user = match user {
        Some(u) if verify_password(&req.password, &u.password_hash) => u,
        Some(_) => {
            security_log!("WARN", "login_failed", email = req.email.clone(), reason = "invalid_password");
            return Err(AppError::invalid_credentials());
        }
        None => {
            security_log!("WARN", "login_failed", email = req.email.clone(), reason = "user_not_found");
            return Err(AppError::invalid_credentials());
        }
    };

    let jwt_service = state.get_jwt_service();
    let token = jwt_service
        .generate_token(&user)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(
        user_id = %user.id,
        role = %user.role,
        "User logged in successfully"
    );

    Ok(Json(LoginResponse {
        token,
        expires_in: jwt_service.expires_in_seconds(),
        user: UserInfo::from(&user),
    }))
}

/// Get current user info
pub async fn me(State(state): State<ServerState>, user: CurrentUser) -> AppResult<Json<UserInfo>> {
    let repo = UserRepository::new(state.store.clone());
    let stored = repo
        .find_by_id(&user.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;
    Ok(Json(UserInfo::from(&stored)))
}

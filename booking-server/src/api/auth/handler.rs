//! Authentication Handlers
//!
//! Handles registration, login and the current-user lookup

use std::time::Duration;

use axum::{Json, extract::State};

use crate::auth::password::{hash_password, verify_password};
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{RepoError, user};
use crate::security_log;
use crate::utils::validation::{
    MAX_NAME_LEN, normalize_email, validate_optional_text, validate_password,
};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{AuthResponse, LoginRequest, RegisterRequest, User, UserInfo};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 300;

fn issue_token(state: &ServerState, user: &User) -> AppResult<String> {
    state
        .get_jwt_service()
        .generate_token(user)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))
}

/// POST /api/auth/register - create a guest account and sign it in
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<Json<AuthResponse>> {
    let email = normalize_email(&req.email)?;
    validate_password(&req.password, "password")?;
    validate_optional_text(&req.first_name, "first_name", MAX_NAME_LEN)?;
    validate_optional_text(&req.last_name, "last_name", MAX_NAME_LEN)?;

    if user::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(AppError::new(ErrorCode::EmailAlreadyRegistered).for_field("email"));
    }

    let password_hash = hash_password(&req.password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))?;

    let first_name = req.first_name.as_deref().map(str::trim).unwrap_or_default();
    let last_name = req.last_name.as_deref().map(str::trim).unwrap_or_default();

    // Unique index catches a concurrent registration of the same address
    let created = user::create(&state.pool, &email, &password_hash, first_name, last_name)
        .await
        .map_err(|e| match e {
            RepoError::Duplicate(_) => {
                AppError::new(ErrorCode::EmailAlreadyRegistered).for_field("email")
            }
            other => other.into(),
        })?;

    let token = issue_token(&state, &created)?;

    tracing::info!(user_id = created.id, email = %created.email, "User registered");

    Ok(Json(AuthResponse {
        token,
        user: UserInfo::from(&created),
    }))
}

/// POST /api/auth/login
///
/// Unknown email and wrong password produce the same error.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let email = req.email.trim().to_lowercase();
    let found = user::find_by_email(&state.pool, &email).await?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let account = match found {
        Some(account) => {
            let password_valid = verify_password(&req.password, &account.password_hash)
                .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;

            if !password_valid {
                security_log!("WARN", "login_failed", email = email.clone(), reason = "invalid_password");
                tracing::warn!(email = %email, "Login failed - invalid credentials");
                return Err(AppError::invalid_credentials());
            }

            if !account.is_active {
                security_log!("WARN", "login_failed", email = email.clone(), reason = "account_disabled");
                return Err(AppError::new(ErrorCode::AccountDisabled));
            }

            account
        }
        None => {
            security_log!("WARN", "login_failed", email = email.clone(), reason = "user_not_found");
            tracing::warn!(email = %email, "Login failed - user not found");
            return Err(AppError::invalid_credentials());
        }
    };

    let token = issue_token(&state, &account)?;

    tracing::info!(
        user_id = account.id,
        email = %account.email,
        is_staff = account.is_staff,
        "User logged in successfully"
    );

    Ok(Json(AuthResponse {
        token,
        user: UserInfo::from(&account),
    }))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<ServerState>,
    current_user: CurrentUser,
) -> AppResult<Json<UserInfo>> {
    let account = user::find_by_id(&state.pool, current_user.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;
    Ok(Json(UserInfo::from(&account)))
}

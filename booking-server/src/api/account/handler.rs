//! Account API Handlers

use axum::{Json, extract::State};

use crate::auth::CurrentUser;
use crate::auth::password::{hash_password, verify_password};
use crate::core::ServerState;
use crate::db::repository::{favorite, reservation, user};
use crate::security_log;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_PHONE_LEN, MAX_POSTAL_CODE_LEN, validate_optional_text,
    validate_password,
};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{AuthResponse, MyPage, PasswordChange, ProfileUpdate, UserInfo};

/// Favorites shown on the my page
const MYPAGE_FAVORITES: i64 = 5;

/// GET /api/account/mypage - profile, latest favorites, upcoming bookings
pub async fn mypage(
    State(state): State<ServerState>,
    current_user: CurrentUser,
) -> AppResult<Json<MyPage>> {
    let account = user::find_by_id(&state.pool, current_user.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;

    let favorite_restaurants =
        favorite::list_for_user(&state.pool, current_user.id, Some(MYPAGE_FAVORITES)).await?;
    let upcoming_reservations =
        reservation::list_upcoming_for_user(&state.pool, current_user.id, state.clock.today())
            .await?;

    Ok(Json(MyPage {
        user: UserInfo::from(&account),
        favorite_restaurants,
        upcoming_reservations,
    }))
}

/// PUT /api/account/profile
pub async fn update_profile(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Json(payload): Json<ProfileUpdate>,
) -> AppResult<Json<UserInfo>> {
    validate_optional_text(&payload.first_name, "first_name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.last_name, "last_name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.postal_code, "postal_code", MAX_POSTAL_CODE_LEN)?;
    validate_optional_text(&payload.address, "address", MAX_ADDRESS_LEN)?;
    validate_optional_text(&payload.phone_number, "phone_number", MAX_PHONE_LEN)?;

    let updated = user::update_profile(&state.pool, current_user.id, &payload).await?;
    Ok(Json(UserInfo::from(&updated)))
}

/// POST /api/account/password - returns a fresh token
pub async fn change_password(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Json(payload): Json<PasswordChange>,
) -> AppResult<Json<AuthResponse>> {
    validate_password(&payload.new_password, "new_password")?;

    let account = user::find_by_id(&state.pool, current_user.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;

    let matches = verify_password(&payload.old_password, &account.password_hash)
        .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;
    if !matches {
        security_log!("WARN", "password_change_failed", user_id = current_user.id);
        return Err(AppError::new(ErrorCode::PasswordMismatch).for_field("old_password"));
    }

    let password_hash = hash_password(&payload.new_password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))?;
    user::update_password(&state.pool, current_user.id, &password_hash).await?;

    let token = state
        .get_jwt_service()
        .generate_token(&account)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(user_id = current_user.id, "Password changed");

    Ok(Json(AuthResponse {
        token,
        user: UserInfo::from(&account),
    }))
}

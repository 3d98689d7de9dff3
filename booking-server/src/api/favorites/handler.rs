//! Favorite API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{favorite, restaurant};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{FavoriteRestaurant, FavoriteToggle};

async fn ensure_restaurant(state: &ServerState, restaurant_id: i64) -> AppResult<()> {
    if !restaurant::exists(&state.pool, restaurant_id).await? {
        return Err(AppError::new(ErrorCode::RestaurantNotFound));
    }
    Ok(())
}

/// GET /api/restaurants/{id}/favorite
///
/// Sits under the public `GET /api/restaurants*` prefix, so the
/// [`CurrentUser`] extractor does the token check itself.
pub async fn status(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(restaurant_id): Path<i64>,
) -> AppResult<Json<FavoriteToggle>> {
    ensure_restaurant(&state, restaurant_id).await?;
    let is_favorite = favorite::is_favorite(&state.pool, current_user.id, restaurant_id).await?;
    Ok(Json(FavoriteToggle { is_favorite }))
}

/// POST /api/restaurants/{id}/favorite
pub async fn toggle(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(restaurant_id): Path<i64>,
) -> AppResult<Json<FavoriteToggle>> {
    ensure_restaurant(&state, restaurant_id).await?;
    let is_favorite = favorite::toggle(&state.pool, current_user.id, restaurant_id).await?;

    tracing::info!(restaurant_id, user_id = current_user.id, is_favorite, "Favorite toggled");
    Ok(Json(FavoriteToggle { is_favorite }))
}

/// GET /api/favorites - newest first
pub async fn list(
    State(state): State<ServerState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<FavoriteRestaurant>>> {
    let favorites = favorite::list_for_user(&state.pool, current_user.id, None).await?;
    Ok(Json(favorites))
}

//! Review API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{RepoError, restaurant, review};
use crate::security_log;
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{
    MAX_COMMENT_CHARS, MAX_RATING, MIN_COMMENT_CHARS, MIN_RATING, Review, ReviewInput,
    ReviewUpdate, ReviewWithAuthor,
};

fn check_rating(rating: i64) -> AppResult<()> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(AppError::new(ErrorCode::ReviewRatingOutOfRange).for_field("rating"));
    }
    Ok(())
}

/// Trimmed comment, 10..=1000 characters
fn check_comment(comment: &str) -> AppResult<&str> {
    let comment = comment.trim();
    let len = comment.chars().count();
    if len < MIN_COMMENT_CHARS {
        return Err(AppError::new(ErrorCode::ReviewCommentTooShort).for_field("comment"));
    }
    if len > MAX_COMMENT_CHARS {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("Comment is too long ({len} chars, max {MAX_COMMENT_CHARS})"),
        )
        .for_field("comment"));
    }
    Ok(comment)
}

/// Load a review and make sure the caller wrote it
async fn find_owned(state: &ServerState, id: i64, current_user: &CurrentUser) -> AppResult<Review> {
    let found = review::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ReviewNotFound))?;
    if found.user_id != current_user.id {
        security_log!("WARN", "review_not_owner", user_id = current_user.id, review_id = id);
        return Err(AppError::new(ErrorCode::PermissionDenied));
    }
    Ok(found)
}

/// GET /api/restaurants/{id}/reviews
pub async fn list(
    State(state): State<ServerState>,
    Path(restaurant_id): Path<i64>,
) -> AppResult<Json<Vec<ReviewWithAuthor>>> {
    if !restaurant::exists(&state.pool, restaurant_id).await? {
        return Err(AppError::new(ErrorCode::RestaurantNotFound));
    }
    let reviews = review::list_for_restaurant(&state.pool, restaurant_id).await?;
    Ok(Json(reviews))
}

/// POST /api/restaurants/{id}/reviews
pub async fn create(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(restaurant_id): Path<i64>,
    Json(payload): Json<ReviewInput>,
) -> AppResult<Json<Review>> {
    check_rating(payload.rating)?;
    let comment = check_comment(&payload.comment)?;

    if !restaurant::exists(&state.pool, restaurant_id).await? {
        return Err(AppError::new(ErrorCode::RestaurantNotFound));
    }

    let created = review::create(
        &state.pool,
        current_user.id,
        restaurant_id,
        payload.rating,
        comment,
    )
    .await
    .map_err(|e| match e {
        RepoError::Duplicate(_) => AppError::new(ErrorCode::ReviewAlreadyExists),
        RepoError::NotFound(_) => AppError::new(ErrorCode::RestaurantNotFound),
        other => other.into(),
    })?;

    tracing::info!(
        review_id = created.id,
        restaurant_id,
        user_id = current_user.id,
        rating = created.rating,
        "Review posted"
    );
    Ok(Json(created))
}

/// PUT /api/reviews/{id}
pub async fn update(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<ReviewUpdate>,
) -> AppResult<Json<Review>> {
    if let Some(rating) = payload.rating {
        check_rating(rating)?;
    }
    let comment = payload.comment.as_deref().map(check_comment).transpose()?;

    find_owned(&state, id, &current_user).await?;

    let updated = review::update(&state.pool, id, payload.rating, comment)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => AppError::new(ErrorCode::ReviewNotFound),
            other => other.into(),
        })?;
    Ok(Json(updated))
}

/// DELETE /api/reviews/{id}
pub async fn delete(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    find_owned(&state, id, &current_user).await?;

    let deleted = review::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::new(ErrorCode::ReviewNotFound));
    }

    tracing::info!(review_id = id, user_id = current_user.id, "Review deleted");
    Ok(Json(true))
}

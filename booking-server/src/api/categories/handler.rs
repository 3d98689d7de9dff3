//! Category API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{RepoError, category};
use crate::utils::validation::{MAX_CATEGORY_NAME_LEN, validate_required_text};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{Category, CategoryCreate, CategoryUpdate};

fn map_write_error(err: RepoError) -> AppError {
    match err {
        RepoError::Duplicate(_) => AppError::new(ErrorCode::CategoryNameExists).for_field("name"),
        RepoError::NotFound(_) => AppError::new(ErrorCode::CategoryNotFound),
        other => other.into(),
    }
}

/// GET /api/categories
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Category>>> {
    let categories = category::find_all(&state.pool).await?;
    Ok(Json(categories))
}

/// GET /api/categories/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Category>> {
    let found = category::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::CategoryNotFound))?;
    Ok(Json(found))
}

/// POST /api/categories
pub async fn create(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Json(payload): Json<CategoryCreate>,
) -> AppResult<Json<Category>> {
    validate_required_text(&payload.name, "name", MAX_CATEGORY_NAME_LEN)?;

    let created = category::create(&state.pool, payload)
        .await
        .map_err(map_write_error)?;

    tracing::info!(category_id = created.id, operator_id = current_user.id, name = %created.name, "Category created");
    Ok(Json(created))
}

/// PUT /api/categories/{id}
pub async fn update(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<CategoryUpdate>,
) -> AppResult<Json<Category>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_CATEGORY_NAME_LEN)?;
    }

    let updated = category::update(&state.pool, id, payload)
        .await
        .map_err(map_write_error)?;

    tracing::info!(category_id = id, operator_id = current_user.id, "Category updated");
    Ok(Json(updated))
}

/// DELETE /api/categories/{id} - removes the category's restaurants too
pub async fn delete(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let deleted = category::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::new(ErrorCode::CategoryNotFound));
    }

    tracing::info!(category_id = id, operator_id = current_user.id, "Category deleted");
    Ok(Json(true))
}

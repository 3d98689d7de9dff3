//! Favorite Repository

use super::RepoResult;
use shared::models::FavoriteRestaurant;
use sqlx::SqlitePool;

const FAVORITE_RESTAURANT_SELECT: &str = "SELECT f.id, f.restaurant_id, r.name AS restaurant_name, c.name AS category_name, r.address, r.image_url, f.created_at FROM favorite f JOIN restaurant r ON r.id = f.restaurant_id JOIN category c ON c.id = r.category_id";

pub async fn is_favorite(pool: &SqlitePool, user_id: i64, restaurant_id: i64) -> RepoResult<bool> {
    let found: Option<i64> =
        sqlx::query_scalar("SELECT id FROM favorite WHERE user_id = ? AND restaurant_id = ?")
            .bind(user_id)
            .bind(restaurant_id)
            .fetch_optional(pool)
            .await?;
    Ok(found.is_some())
}

/// Flip the favorite flag; returns the new state
pub async fn toggle(pool: &SqlitePool, user_id: i64, restaurant_id: i64) -> RepoResult<bool> {
    let mut tx = pool.begin().await?;

    let removed = sqlx::query("DELETE FROM favorite WHERE user_id = ? AND restaurant_id = ?")
        .bind(user_id)
        .bind(restaurant_id)
        .execute(&mut *tx)
        .await?;

    let is_favorite = if removed.rows_affected() > 0 {
        false
    } else {
        sqlx::query(
            "INSERT INTO favorite (id, user_id, restaurant_id, created_at) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(shared::util::snowflake_id())
        .bind(user_id)
        .bind(restaurant_id)
        .bind(shared::util::now_millis())
        .execute(&mut *tx)
        .await?;
        true
    };

    tx.commit().await?;
    Ok(is_favorite)
}

/// A user's favorites, newest first (`limit` caps the count)
pub async fn list_for_user(
    pool: &SqlitePool,
    user_id: i64,
    limit: Option<i64>,
) -> RepoResult<Vec<FavoriteRestaurant>> {
    // LIMIT -1 means no limit in SQLite
    let sql = format!(
        "{FAVORITE_RESTAURANT_SELECT} WHERE f.user_id = ? ORDER BY f.created_at DESC, f.id DESC LIMIT ?"
    );
    let rows = sqlx::query_as::<_, FavoriteRestaurant>(&sql)
        .bind(user_id)
        .bind(limit.unwrap_or(-1))
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

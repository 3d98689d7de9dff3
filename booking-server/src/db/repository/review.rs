//! Review Repository

use super::{RepoError, RepoResult};
use shared::models::{Review, ReviewWithAuthor};
use sqlx::SqlitePool;

const REVIEW_SELECT: &str = "SELECT id, user_id, restaurant_id, rating, comment, is_approved, helpful_count, created_at, updated_at FROM review";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Review>> {
    let sql = format!("{REVIEW_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Review>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_user_and_restaurant(
    pool: &SqlitePool,
    user_id: i64,
    restaurant_id: i64,
) -> RepoResult<Option<Review>> {
    let sql = format!("{REVIEW_SELECT} WHERE user_id = ? AND restaurant_id = ?");
    let row = sqlx::query_as::<_, Review>(&sql)
        .bind(user_id)
        .bind(restaurant_id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Approved reviews of a restaurant, newest first
pub async fn list_for_restaurant(
    pool: &SqlitePool,
    restaurant_id: i64,
) -> RepoResult<Vec<ReviewWithAuthor>> {
    let rows = sqlx::query_as::<_, ReviewWithAuthor>(
        "SELECT rv.id, rv.user_id, rv.restaurant_id, COALESCE(NULLIF(TRIM(u.last_name || ' ' || u.first_name), ''), u.email) AS author_name, rv.rating, rv.comment, rv.helpful_count, rv.created_at, rv.updated_at FROM review rv JOIN user u ON u.id = rv.user_id WHERE rv.restaurant_id = ? AND rv.is_approved = 1 ORDER BY rv.created_at DESC, rv.id DESC",
    )
    .bind(restaurant_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Create a review; a second review by the same user is a `Duplicate`
pub async fn create(
    pool: &SqlitePool,
    user_id: i64,
    restaurant_id: i64,
    rating: i64,
    comment: &str,
) -> RepoResult<Review> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO review (id, user_id, restaurant_id, rating, comment, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
    )
    .bind(id)
    .bind(user_id)
    .bind(restaurant_id)
    .bind(rating)
    .bind(comment)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create review".into()))
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    rating: Option<i64>,
    comment: Option<&str>,
) -> RepoResult<Review> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE review SET rating = COALESCE(?1, rating), comment = COALESCE(?2, comment), updated_at = ?3 WHERE id = ?4",
    )
    .bind(rating)
    .bind(comment)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Review {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Review {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM review WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support;

    #[tokio::test]
    async fn test_one_review_per_user_and_restaurant() {
        let pool = test_support::pool().await;
        let user = test_support::seed_user(&pool, "guest@example.com").await;
        let r = test_support::seed_restaurant(&pool, "Kanda").await;

        let review = create(&pool, user.id, r.id, 5, "Best tempura of my life").await.unwrap();
        assert!(review.is_approved);
        assert_eq!(review.helpful_count, 0);

        let err = create(&pool, user.id, r.id, 4, "Second opinion here").await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));

        let found = find_by_user_and_restaurant(&pool, user.id, r.id).await.unwrap();
        assert_eq!(found.map(|rv| rv.id), Some(review.id));
    }

    #[tokio::test]
    async fn test_rating_check_constraint() {
        let pool = test_support::pool().await;
        let user = test_support::seed_user(&pool, "guest@example.com").await;
        let r = test_support::seed_restaurant(&pool, "Kanda").await;
        let err = create(&pool, user.id, r.id, 6, "Off the charts!!").await.unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
    }

    #[tokio::test]
    async fn test_list_newest_first_with_author() {
        let pool = test_support::pool().await;
        let r = test_support::seed_restaurant(&pool, "Kanda").await;
        let first = test_support::seed_user(&pool, "first@example.com").await;
        let second = test_support::seed_user(&pool, "second@example.com").await;

        create(&pool, first.id, r.id, 3, "Decent but pricey").await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(3)).await;
        create(&pool, second.id, r.id, 5, "Unforgettable dinner").await.unwrap();

        let reviews = list_for_restaurant(&pool, r.id).await.unwrap();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].user_id, second.id);
        assert_eq!(reviews[0].author_name, "Yamada Taro");
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let pool = test_support::pool().await;
        let user = test_support::seed_user(&pool, "guest@example.com").await;
        let r = test_support::seed_restaurant(&pool, "Kanda").await;
        let review = create(&pool, user.id, r.id, 2, "Service was slow").await.unwrap();

        let updated = update(&pool, review.id, Some(4), None).await.unwrap();
        assert_eq!(updated.rating, 4);
        assert_eq!(updated.comment, "Service was slow");

        assert!(delete(&pool, review.id).await.unwrap());
        assert!(find_by_id(&pool, review.id).await.unwrap().is_none());
    }
}

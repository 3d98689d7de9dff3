//! User Repository

use super::{RepoError, RepoResult};
use shared::models::{ProfileUpdate, User};
use sqlx::SqlitePool;

const USER_SELECT: &str = "SELECT id, email, password_hash, first_name, last_name, is_premium, is_staff, is_active, postal_code, address, phone_number, created_at, updated_at FROM user";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<User>> {
    let sql = format!("{USER_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, User>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Lookup by normalized (lowercase) email
pub async fn find_by_email(pool: &SqlitePool, email: &str) -> RepoResult<Option<User>> {
    let sql = format!("{USER_SELECT} WHERE email = ?");
    let row = sqlx::query_as::<_, User>(&sql)
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(
    pool: &SqlitePool,
    email: &str,
    password_hash: &str,
    first_name: &str,
    last_name: &str,
) -> RepoResult<User> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO user (id, email, password_hash, first_name, last_name, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
    )
    .bind(id)
    .bind(email)
    .bind(password_hash)
    .bind(first_name)
    .bind(last_name)
    .bind(now)
    .execute(pool)
    .await
    .map_err(|e| match RepoError::from(e) {
        RepoError::Duplicate(_) => RepoError::Duplicate(format!("User {email}")),
        other => other,
    })?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create user".into()))
}

pub async fn update_profile(pool: &SqlitePool, id: i64, data: &ProfileUpdate) -> RepoResult<User> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE user SET first_name = COALESCE(?1, first_name), last_name = COALESCE(?2, last_name), postal_code = COALESCE(?3, postal_code), address = COALESCE(?4, address), phone_number = COALESCE(?5, phone_number), updated_at = ?6 WHERE id = ?7",
    )
    .bind(&data.first_name)
    .bind(&data.last_name)
    .bind(&data.postal_code)
    .bind(&data.address)
    .bind(&data.phone_number)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("User {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("User {id} not found")))
}

pub async fn update_password(pool: &SqlitePool, id: i64, password_hash: &str) -> RepoResult<()> {
    let now = shared::util::now_millis();
    let rows = sqlx::query("UPDATE user SET password_hash = ?1, updated_at = ?2 WHERE id = ?3")
        .bind(password_hash)
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("User {id} not found")));
    }
    Ok(())
}

/// Grant or revoke staff rights (admin tooling, seeding)
pub async fn set_staff(pool: &SqlitePool, id: i64, is_staff: bool) -> RepoResult<()> {
    let now = shared::util::now_millis();
    let rows = sqlx::query("UPDATE user SET is_staff = ?1, updated_at = ?2 WHERE id = ?3")
        .bind(is_staff)
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("User {id} not found")));
    }
    Ok(())
}

pub async fn set_active(pool: &SqlitePool, id: i64, is_active: bool) -> RepoResult<()> {
    let now = shared::util::now_millis();
    let rows = sqlx::query("UPDATE user SET is_active = ?1, updated_at = ?2 WHERE id = ?3")
        .bind(is_active)
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("User {id} not found")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support;

    #[tokio::test]
    async fn test_create_and_find() {
        let pool = test_support::pool().await;
        let user = create(&pool, "guest@example.com", "hash", "Taro", "Yamada")
            .await
            .unwrap();

        assert!(!user.is_staff);
        assert!(!user.is_premium);
        assert!(user.is_active);

        let by_email = find_by_email(&pool, "guest@example.com").await.unwrap().unwrap();
        assert_eq!(by_email.id, user.id);
        assert!(find_by_email(&pool, "nobody@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email() {
        let pool = test_support::pool().await;
        create(&pool, "guest@example.com", "hash", "", "").await.unwrap();
        let err = create(&pool, "guest@example.com", "hash", "", "").await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_update_profile_keeps_absent_fields() {
        let pool = test_support::pool().await;
        let user = test_support::seed_user(&pool, "guest@example.com").await;

        let updated = update_profile(
            &pool,
            user.id,
            &ProfileUpdate {
                postal_code: Some("100-0001".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.postal_code.as_deref(), Some("100-0001"));
        assert_eq!(updated.first_name, "Taro");
        assert!(updated.updated_at >= user.updated_at);
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let pool = test_support::pool().await;
        let err = update_password(&pool, 1, "hash").await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_flags() {
        let pool = test_support::pool().await;
        let user = test_support::seed_user(&pool, "staff@example.com").await;
        set_staff(&pool, user.id, true).await.unwrap();
        set_active(&pool, user.id, false).await.unwrap();

        let user = find_by_id(&pool, user.id).await.unwrap().unwrap();
        assert!(user.is_staff);
        assert!(!user.is_active);
    }
}

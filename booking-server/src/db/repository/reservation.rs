//! Reservation Repository
//!
//! Reservations are inserted confirmed and only ever change status.

use super::{RepoError, RepoResult};
use chrono::NaiveDate;
use shared::models::{Reservation, ReservationWithRestaurant};
use shared::reservation::{ReservationStatus, ValidReservation};
use sqlx::SqlitePool;

const RESERVATION_SELECT: &str = "SELECT id, user_id, restaurant_id, reservation_date, reservation_time, number_of_people, status, created_at, updated_at FROM reservation";

const WITH_RESTAURANT_SELECT: &str = "SELECT rs.id, rs.user_id, rs.restaurant_id, r.name AS restaurant_name, rs.reservation_date, rs.reservation_time, rs.number_of_people, rs.status, rs.created_at, rs.updated_at FROM reservation rs JOIN restaurant r ON r.id = rs.restaurant_id";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Reservation>> {
    let sql = format!("{RESERVATION_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Reservation>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_with_restaurant(
    pool: &SqlitePool,
    id: i64,
) -> RepoResult<Option<ReservationWithRestaurant>> {
    let sql = format!("{WITH_RESTAURANT_SELECT} WHERE rs.id = ?");
    let row = sqlx::query_as::<_, ReservationWithRestaurant>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// A user's reservations, latest date first
pub async fn list_for_user(
    pool: &SqlitePool,
    user_id: i64,
) -> RepoResult<Vec<ReservationWithRestaurant>> {
    let sql = format!(
        "{WITH_RESTAURANT_SELECT} WHERE rs.user_id = ? ORDER BY rs.reservation_date DESC, rs.reservation_time DESC"
    );
    let rows = sqlx::query_as::<_, ReservationWithRestaurant>(&sql)
        .bind(user_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Confirmed reservations on or after `from`, soonest first
pub async fn list_upcoming_for_user(
    pool: &SqlitePool,
    user_id: i64,
    from: NaiveDate,
) -> RepoResult<Vec<ReservationWithRestaurant>> {
    let sql = format!(
        "{WITH_RESTAURANT_SELECT} WHERE rs.user_id = ? AND rs.status = 'confirmed' AND rs.reservation_date >= ? ORDER BY rs.reservation_date, rs.reservation_time"
    );
    let rows = sqlx::query_as::<_, ReservationWithRestaurant>(&sql)
        .bind(user_id)
        .bind(from)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Persist a validated booking as confirmed
pub async fn create(
    pool: &SqlitePool,
    user_id: i64,
    restaurant_id: i64,
    booking: &ValidReservation,
) -> RepoResult<Reservation> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO reservation (id, user_id, restaurant_id, reservation_date, reservation_time, number_of_people, status, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
    )
    .bind(id)
    .bind(user_id)
    .bind(restaurant_id)
    .bind(booking.date)
    .bind(booking.time.format("%H:%M").to_string())
    .bind(booking.party_size)
    .bind(ReservationStatus::Confirmed)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create reservation".into()))
}

/// Write a new status
///
/// Guarded on the expected current status, so a concurrent change makes this
/// a `NotFound` instead of a lost update.
pub async fn update_status(
    pool: &SqlitePool,
    id: i64,
    from: ReservationStatus,
    to: ReservationStatus,
) -> RepoResult<Reservation> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE reservation SET status = ?1, updated_at = ?2 WHERE id = ?3 AND status = ?4",
    )
    .bind(to)
    .bind(now)
    .bind(id)
    .bind(from)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Reservation {id} not found in status {from}"
        )));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Reservation {id} not found")))
}

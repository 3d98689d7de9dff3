//! Reservation API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::Value;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{RepoError, reservation, restaurant};
use crate::security_log;
use crate::utils::time::parse_date;
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{Reservation, ReservationForm, ReservationWithRestaurant};
use shared::reservation::{ReservationRequest, validate};

/// Blank form fields count as not supplied
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Party size as a whole number; blank or null counts as not supplied
fn parse_party_size(raw: Option<Value>) -> AppResult<Option<i64>> {
    let invalid = || {
        AppError::with_message(
            ErrorCode::InvalidFormat,
            "Number of people must be a whole number",
        )
        .for_field("number_of_people")
    };
    match raw {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n.as_i64().map(Some).ok_or_else(invalid),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s.trim().parse().map(Some).map_err(|_| invalid()),
        Some(_) => Err(invalid()),
    }
}

/// Turn the raw form into a validator request
///
/// A date that is present but not `YYYY-MM-DD`, or a party size that is not a
/// whole number, is rejected here before any booking rule runs.
fn to_request(form: ReservationForm) -> AppResult<ReservationRequest> {
    let date = non_blank(form.reservation_date)
        .map(|raw| parse_date(&raw).map_err(|e| e.for_field("reservation_date")))
        .transpose()?;
    let party_size = parse_party_size(form.number_of_people)?;

    Ok(ReservationRequest {
        date,
        time: form.reservation_time,
        party_size,
    })
}

/// Load a reservation and make sure it belongs to the caller
async fn find_owned(
    state: &ServerState,
    id: i64,
    current_user: &CurrentUser,
) -> AppResult<ReservationWithRestaurant> {
    let found = reservation::find_with_restaurant(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ReservationNotFound))?;
    if found.user_id != current_user.id {
        security_log!("WARN", "reservation_not_owner", user_id = current_user.id, reservation_id = id);
        return Err(AppError::new(ErrorCode::PermissionDenied));
    }
    Ok(found)
}

/// POST /api/restaurants/{id}/reservations
pub async fn create(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(restaurant_id): Path<i64>,
    Json(form): Json<ReservationForm>,
) -> AppResult<Json<Reservation>> {
    if !restaurant::exists(&state.pool, restaurant_id).await? {
        return Err(AppError::new(ErrorCode::RestaurantNotFound));
    }

    let request = to_request(form)?;
    let now = state.now();
    let booking = validate(&request, now).map_err(|e| {
        tracing::debug!(
            user_id = current_user.id,
            restaurant_id,
            rule = ?e,
            "Reservation rejected"
        );
        AppError::from(e)
    })?;

    let created = reservation::create(&state.pool, current_user.id, restaurant_id, &booking)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => AppError::new(ErrorCode::RestaurantNotFound),
            other => other.into(),
        })?;

    tracing::info!(
        reservation_id = created.id,
        restaurant_id,
        user_id = current_user.id,
        date = %created.reservation_date,
        time = %created.reservation_time,
        party_size = created.number_of_people,
        "Reservation confirmed"
    );
    Ok(Json(created))
}

/// GET /api/reservations - newest date first
pub async fn list(
    State(state): State<ServerState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<ReservationWithRestaurant>>> {
    let reservations = reservation::list_for_user(&state.pool, current_user.id).await?;
    Ok(Json(reservations))
}

/// GET /api/reservations/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<ReservationWithRestaurant>> {
    let found = find_owned(&state, id, &current_user).await?;
    Ok(Json(found))
}

/// POST /api/reservations/{id}/cancel
pub async fn cancel(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Reservation>> {
    let found = find_owned(&state, id, &current_user).await?;
    let next = found.status.cancel()?;

    // Lost a race with another cancel
    let cancelled = reservation::update_status(&state.pool, id, found.status, next)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => AppError::new(ErrorCode::ReservationAlreadyCancelled),
            other => other.into(),
        })?;

    tracing::info!(reservation_id = id, user_id = current_user.id, "Reservation cancelled");
    Ok(Json(cancelled))
}

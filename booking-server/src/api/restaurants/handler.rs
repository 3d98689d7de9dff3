//! Restaurant API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{RepoError, category, restaurant};
use crate::utils::time::parse_hhmm;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_DESCRIPTION_LEN, MAX_HOLIDAY_LEN, MAX_NAME_LEN, MAX_PHONE_LEN,
    MAX_URL_LEN, validate_optional_text, validate_required_text, validate_text_len,
};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{
    Restaurant, RestaurantCreate, RestaurantDetail, RestaurantPage, RestaurantQuery,
    RestaurantUpdate,
};
use shared::reservation::{
    BOOKING_HORIZON_DAYS, LAST_CALL, MAX_PARTY_SIZE, MIN_PARTY_SIZE, OPENING,
    SLOT_INTERVAL_MINUTES, TIME_SLOTS, TimeSlot,
};

async fn ensure_category(state: &ServerState, category_id: i64) -> AppResult<()> {
    if category::find_by_id(&state.pool, category_id).await?.is_none() {
        return Err(AppError::new(ErrorCode::CategoryNotFound).for_field("category_id"));
    }
    Ok(())
}

/// Normalize an `HH:MM` business-hours field
fn normalize_hours(value: &str, field: &str) -> AppResult<String> {
    let time = parse_hhmm(value).map_err(|e| e.for_field(field))?;
    Ok(time.format("%H:%M").to_string())
}

/// GET /api/restaurants?page=&q=&category_id=
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<RestaurantQuery>,
) -> AppResult<Json<RestaurantPage>> {
    let page = restaurant::list(&state.pool, &query).await?;
    Ok(Json(page))
}

/// GET /api/restaurants/{id} - detail with ratings and the booking grid
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<RestaurantDetail>> {
    let detail = restaurant::find_detail(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::RestaurantNotFound))?;
    Ok(Json(detail))
}

/// What a booking form needs to render its pickers
#[derive(Debug, Serialize)]
pub struct BookingOptions {
    pub restaurant_id: i64,
    pub time_slots: &'static [TimeSlot],
    pub opening: TimeSlot,
    pub last_call: TimeSlot,
    pub slot_interval_minutes: u32,
    pub earliest_date: NaiveDate,
    pub latest_date: Option<NaiveDate>,
    pub min_party_size: i64,
    pub max_party_size: i64,
}

/// GET /api/restaurants/{id}/time-slots
pub async fn time_slots(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<BookingOptions>> {
    if !restaurant::exists(&state.pool, id).await? {
        return Err(AppError::new(ErrorCode::RestaurantNotFound));
    }

    let today = state.clock.today();
    Ok(Json(BookingOptions {
        restaurant_id: id,
        time_slots: &TIME_SLOTS,
        opening: OPENING,
        last_call: LAST_CALL,
        slot_interval_minutes: SLOT_INTERVAL_MINUTES,
        earliest_date: today,
        latest_date: today.checked_add_days(Days::new(BOOKING_HORIZON_DAYS)),
        min_party_size: MIN_PARTY_SIZE,
        max_party_size: MAX_PARTY_SIZE,
    }))
}

/// POST /api/restaurants
pub async fn create(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Json(mut payload): Json<RestaurantCreate>,
) -> AppResult<Json<Restaurant>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.address, "address", MAX_ADDRESS_LEN)?;
    validate_text_len(&payload.description, "description", MAX_DESCRIPTION_LEN)?;
    validate_text_len(&payload.phone_number, "phone_number", MAX_PHONE_LEN)?;
    validate_text_len(&payload.regular_holiday, "regular_holiday", MAX_HOLIDAY_LEN)?;
    validate_optional_text(&payload.image_url, "image_url", MAX_URL_LEN)?;
    validate_optional_text(&payload.website_url, "website_url", MAX_URL_LEN)?;
    payload.opening_time = normalize_hours(&payload.opening_time, "opening_time")?;
    payload.closing_time = normalize_hours(&payload.closing_time, "closing_time")?;
    ensure_category(&state, payload.category_id).await?;

    // A category deleted in between fails the foreign key
    let created = restaurant::create(&state.pool, payload)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => {
                AppError::new(ErrorCode::CategoryNotFound).for_field("category_id")
            }
            other => other.into(),
        })?;

    tracing::info!(
        restaurant_id = created.id,
        operator_id = current_user.id,
        name = %created.name,
        "Restaurant created"
    );
    Ok(Json(created))
}

/// PUT /api/restaurants/{id}
pub async fn update(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
    Json(mut payload): Json<RestaurantUpdate>,
) -> AppResult<Json<Restaurant>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(address) = &payload.address {
        validate_required_text(address, "address", MAX_ADDRESS_LEN)?;
    }
    validate_optional_text(&payload.description, "description", MAX_DESCRIPTION_LEN)?;
    validate_optional_text(&payload.phone_number, "phone_number", MAX_PHONE_LEN)?;
    validate_optional_text(&payload.regular_holiday, "regular_holiday", MAX_HOLIDAY_LEN)?;
    validate_optional_text(&payload.image_url, "image_url", MAX_URL_LEN)?;
    validate_optional_text(&payload.website_url, "website_url", MAX_URL_LEN)?;
    payload.opening_time = payload
        .opening_time
        .as_deref()
        .map(|t| normalize_hours(t, "opening_time"))
        .transpose()?;
    payload.closing_time = payload
        .closing_time
        .as_deref()
        .map(|t| normalize_hours(t, "closing_time"))
        .transpose()?;
    if let Some(category_id) = payload.category_id {
        ensure_category(&state, category_id).await?;
    }

    let updated = restaurant::update(&state.pool, id, payload)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => AppError::new(ErrorCode::RestaurantNotFound),
            other => other.into(),
        })?;

    tracing::info!(restaurant_id = id, operator_id = current_user.id, "Restaurant updated");
    Ok(Json(updated))
}

/// DELETE /api/restaurants/{id} - reviews, reservations and favorites go with it
pub async fn delete(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let deleted = restaurant::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::new(ErrorCode::RestaurantNotFound));
    }

    tracing::info!(restaurant_id = id, operator_id = current_user.id, "Restaurant deleted");
    Ok(Json(true))
}

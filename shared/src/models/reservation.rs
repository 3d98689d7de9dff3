//! Reservation Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::reservation::ReservationStatus;

/// Reservation entity
///
/// Rows are only ever created confirmed and later cancelled, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Reservation {
    pub id: i64,
    pub user_id: i64,
    pub restaurant_id: i64,
    pub reservation_date: NaiveDate,
    /// Slot label, HH:MM
    pub reservation_time: String,
    pub number_of_people: i64,
    pub status: ReservationStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Reservation joined with the restaurant name (guest listings)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ReservationWithRestaurant {
    pub id: i64,
    pub user_id: i64,
    pub restaurant_id: i64,
    pub restaurant_name: String,
    pub reservation_date: NaiveDate,
    pub reservation_time: String,
    pub number_of_people: i64,
    pub status: ReservationStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Booking form as submitted over HTTP
///
/// Fields stay raw so the server can tell "missing" from "malformed".
/// The party size may arrive as a JSON number or as form text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReservationForm {
    #[serde(default)]
    pub reservation_date: Option<String>,
    #[serde(default)]
    pub reservation_time: Option<String>,
    #[serde(default)]
    pub number_of_people: Option<serde_json::Value>,
}

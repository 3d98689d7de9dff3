//! Reservation API
//!
//! Booking form handling: raw form → [`shared::reservation::validate`] →
//! confirmed reservation. Every route needs a signed-in user.

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/restaurants/{id}/reservations", post(handler::create))
        .route("/api/reservations", get(handler::list))
        .route("/api/reservations/{id}", get(handler::get_by_id))
        .route("/api/reservations/{id}/cancel", post(handler::cancel))
}

//! Favorite API

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/restaurants/{id}/favorite",
            get(handler::status).post(handler::toggle),
        )
        .route("/api/favorites", get(handler::list))
}

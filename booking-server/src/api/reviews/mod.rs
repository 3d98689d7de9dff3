//! Review API
//!
//! Listing is public; writing needs a signed-in user, editing needs the author.

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route(
            "/api/restaurants/{id}/reviews",
            get(handler::list).post(handler::create),
        )
        .route(
            "/api/reviews/{id}",
            put(handler::update).delete(handler::delete),
        )
}

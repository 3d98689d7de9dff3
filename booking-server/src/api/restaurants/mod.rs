//! Restaurant API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/restaurants | GET | none |
//! | /api/restaurants/{id} | GET | none |
//! | /api/restaurants/{id}/time-slots | GET | none |
//! | /api/restaurants | POST | staff |
//! | /api/restaurants/{id} | PUT, DELETE | staff |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::require_staff;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/api/restaurants", get(handler::list))
        .route("/api/restaurants/{id}", get(handler::get_by_id))
        .route("/api/restaurants/{id}/time-slots", get(handler::time_slots));

    let manage_routes = Router::new()
        .route("/api/restaurants", post(handler::create))
        .route(
            "/api/restaurants/{id}",
            put(handler::update).delete(handler::delete),
        )
        .route_layer(middleware::from_fn(require_staff));

    read_routes.merge(manage_routes)
}

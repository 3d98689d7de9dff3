//! Category API
//!
//! Browsing is public; writes need a staff account.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::require_staff;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/api/categories", get(handler::list))
        .route("/api/categories/{id}", get(handler::get_by_id));

    let manage_routes = Router::new()
        .route("/api/categories", post(handler::create))
        .route(
            "/api/categories/{id}",
            put(handler::update).delete(handler::delete),
        )
        .route_layer(middleware::from_fn(require_staff));

    read_routes.merge(manage_routes)
}

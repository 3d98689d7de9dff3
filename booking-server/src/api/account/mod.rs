//! Account API
//!
//! All routes require a signed-in user.

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/account/mypage", get(handler::mypage))
        .route("/api/account/profile", put(handler::update_profile))
        .route("/api/account/password", post(handler::change_password))
}

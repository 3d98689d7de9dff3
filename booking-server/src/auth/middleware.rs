//! Authentication middleware
//!
//! [`require_auth`] runs at router level and lets public routes through;
//! [`require_staff`] is layered onto staff-only route groups.
//!
//! ```ignore
//! Router::new()
//!     .route("/api/categories", post(handler::create))
//!     .route_layer(middleware::from_fn(require_staff));
//! ```

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::AppError;
use crate::auth::CurrentUser;
use crate::auth::extractor::authenticate;
use crate::core::ServerState;
use crate::security_log;
use crate::utils::ErrorCode;

/// Whether a request may pass without a token
///
/// - `OPTIONS *` (CORS preflight)
/// - anything outside `/api/` (health, unknown paths that should 404)
/// - registration and login
/// - read-only catalog browsing: `GET /api/categories*`, `GET /api/restaurants*`
pub fn is_public_route(method: &http::Method, path: &str) -> bool {
    if *method == http::Method::OPTIONS || !path.starts_with("/api/") {
        return true;
    }
    if path == "/api/auth/login" || path == "/api/auth/register" {
        return true;
    }
    *method == http::Method::GET
        && (path.starts_with("/api/categories") || path.starts_with("/api/restaurants"))
}

/// Require a valid bearer token on non-public routes
///
/// Injects [`CurrentUser`] into the request extensions.
///
/// | Failure | Status |
/// |---------|--------|
/// | No Authorization header | 401 NotAuthenticated |
/// | Expired token | 401 TokenExpired |
/// | Invalid token | 401 TokenInvalid |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if is_public_route(req.method(), req.uri().path()) {
        return Ok(next.run(req).await);
    }

    let user = authenticate(req.headers(), req.uri(), state.get_jwt_service())?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Require a staff account; must run after [`require_auth`]
pub async fn require_staff(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or_else(AppError::unauthorized)?;

    if !user.is_staff {
        security_log!(
            "WARN",
            "staff_required",
            user_id = user.id,
            uri = req.uri().to_string()
        );
        return Err(AppError::new(ErrorCode::StaffRequired));
    }

    Ok(next.run(req).await)
}

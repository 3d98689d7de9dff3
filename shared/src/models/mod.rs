//! Data models
//!
//! Shared between booking-server and clients (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` snowflake ids, timestamps are Unix millis.

pub mod category;
pub mod favorite;
pub mod reservation;
pub mod restaurant;
pub mod review;
pub mod user;

// Re-exports
pub use category::*;
pub use favorite::*;
pub use reservation::*;
pub use restaurant::*;
pub use review::*;
pub use user::*;

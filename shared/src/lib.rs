//! Shared types for the booking service
//!
//! Error codes and response envelopes, data models, and the reservation
//! booking rules. Used by `booking-server` and by API clients.

pub mod error;
pub mod models;
pub mod reservation;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

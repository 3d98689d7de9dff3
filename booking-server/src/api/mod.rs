//! API routes
//!
//! # Modules
//!
//! - [`health`] - liveness and component checks
//! - [`auth`] - registration, login, current user
//! - [`account`] - my page, profile, password
//! - [`categories`] - category catalog
//! - [`restaurants`] - restaurant catalog and booking grid
//! - [`reviews`] - restaurant reviews
//! - [`reservations`] - booking and cancellation
//! - [`favorites`] - favorite restaurants

pub mod account;
pub mod auth;
pub mod categories;
pub mod favorites;
pub mod health;
pub mod reservations;
pub mod restaurants;
pub mod reviews;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};

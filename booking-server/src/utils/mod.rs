//! Utilities: error re-exports, logging, input validation, clocks

pub mod logger;
pub mod time;
pub mod validation;

// Unified error types live in `shared::error`
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

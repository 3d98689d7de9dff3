//! Booking Server - restaurant discovery and table booking
//!
//! # Overview
//!
//! - **Booking rules** (`shared::reservation`): the pure reservation validator
//! - **Database** (`db`): SQLite via sqlx, embedded migrations
//! - **Auth** (`auth`): JWT + Argon2
//! - **HTTP API** (`api`): REST handlers, assembled in `routes`
//!
//! # Layout
//!
//! ```text
//! booking-server/src/
//! ├── core/          # config, state, server, errors
//! ├── auth/          # JWT, password hashing, middleware
//! ├── api/           # HTTP routes and handlers
//! ├── routes/        # router assembly and request logging
//! ├── utils/         # logger, clock, input validation
//! └── db/            # pool setup and repositories
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod routes;
pub mod utils;

pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerError, ServerState};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// Load `.env`, read the configuration and start logging
pub fn setup_environment() -> Result<Config, ServerError> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;
    init_logger_with_file(
        Some(&config.log_level),
        config.log_json,
        config.log_dir.as_deref(),
    );
    Ok(config)
}

pub fn print_banner() {
    println!(
        r#"
    ____              __   _
   / __ )____  ____  / /__(_)___  ____ _
  / __  / __ \/ __ \/ //_/ / __ \/ __ `/
 / /_/ / /_/ / /_/ / ,< / / / / / /_/ /
/_____/\____/\____/_/|_/_/_/ /_/\__, /
                               /____/
    "#
    );
}

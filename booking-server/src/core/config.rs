use std::path::PathBuf;

use chrono_tz::Tz;

use crate::auth::JwtConfig;
use crate::core::ServerError;
use crate::utils::time::parse_timezone;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | ./data | Working directory (database, logs) |
/// | HTTP_PORT | 8000 | HTTP listen port |
/// | DATABASE_PATH | `<WORK_DIR>/booking.db` | SQLite file |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | BUSINESS_TIMEZONE | Asia/Tokyo | Zone the booking rules are evaluated in |
/// | LOG_LEVEL | info | Default log level |
/// | LOG_JSON | false | JSON log lines |
/// | LOG_DIR | (unset) | Daily rolling log files when set |
/// | JWT_SECRET | generated outside production | Token signing secret |
/// | JWT_EXPIRATION_MINUTES | 1440 | Token lifetime |
/// | SHUTDOWN_TIMEOUT_MS | 10000 | Grace period for in-flight requests |
///
/// ```ignore
/// WORK_DIR=/srv/booking HTTP_PORT=8080 cargo run -p booking-server
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub work_dir: String,
    pub http_port: u16,
    pub database_path: String,
    pub environment: String,
    pub business_timezone: Tz,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
    pub jwt: JwtConfig,
    pub shutdown_timeout_ms: u64,
}

impl Config {
    /// Load configuration from environment variables, with defaults
    pub fn from_env() -> Result<Self, ServerError> {
        let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into());
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let database_path = std::env::var("DATABASE_PATH").unwrap_or_else(|_| {
            PathBuf::from(&work_dir)
                .join("booking.db")
                .to_string_lossy()
                .into_owned()
        });

        let tz_name = std::env::var("BUSINESS_TIMEZONE").unwrap_or_else(|_| "Asia/Tokyo".into());
        let business_timezone = parse_timezone(&tz_name).map_err(ServerError::Config)?;

        let jwt = JwtConfig::from_env(environment == "production")
            .map_err(|e| ServerError::Config(e.to_string()))?;

        Ok(Self {
            http_port: env_parse("HTTP_PORT", 8000),
            database_path,
            business_timezone,
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: env_parse("LOG_JSON", false),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            jwt,
            shutdown_timeout_ms: env_parse("SHUTDOWN_TIMEOUT_MS", 10_000),
            work_dir,
            environment,
        })
    }

    /// Configuration for tests and embedding: no environment lookups
    pub fn for_work_dir(work_dir: impl Into<String>, jwt: JwtConfig) -> Self {
        let work_dir = work_dir.into();
        let database_path = PathBuf::from(&work_dir)
            .join("booking.db")
            .to_string_lossy()
            .into_owned();
        Self {
            work_dir,
            http_port: 0,
            database_path,
            environment: "test".into(),
            business_timezone: chrono_tz::Asia::Tokyo,
            log_level: "info".into(),
            log_json: false,
            log_dir: None,
            jwt,
            shutdown_timeout_ms: 1_000,
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

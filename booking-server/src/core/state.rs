use std::sync::Arc;

use chrono::NaiveDateTime;
use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::{Config, Result, ServerError};
use crate::db::DbService;
use crate::utils::time::{Clock, SystemClock};

/// Shared handler state
///
/// Cheap to clone: the pool and services are reference counted.
///
/// | Field | Meaning |
/// |-------|---------|
/// | config | Immutable configuration |
/// | pool | SQLite connection pool |
/// | jwt_service | Token issuing/validation |
/// | clock | Wall-clock time in the business time zone |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub pool: SqlitePool,
    pub jwt_service: Arc<JwtService>,
    pub clock: Arc<dyn Clock>,
}

impl ServerState {
    pub fn new(config: Config, pool: SqlitePool, clock: Arc<dyn Clock>) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        Self {
            config,
            pool,
            jwt_service,
            clock,
        }
    }

    /// Open the database (creating the work dir) and wire the system clock
    pub async fn initialize(config: &Config) -> Result<Self> {
        std::fs::create_dir_all(&config.work_dir)?;

        let db = DbService::new(&config.database_path)
            .await
            .map_err(|e| ServerError::Database(e.message))?;

        let clock = Arc::new(SystemClock::new(config.business_timezone));
        tracing::info!(
            work_dir = %config.work_dir,
            timezone = %config.business_timezone,
            "Server state initialized"
        );

        Ok(Self::new(config.clone(), db.pool, clock))
    }

    pub fn get_jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }

    /// Current local time in the business time zone
    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }
}

use serde::Deserialize;
use std::num::{NonZeroU32, NonZeroU64};

use crate::util::DatabaseUrl;

/// Configuration for connecting to the Postgres database used by
/// the `postgres` storage backend.
#[derive(Debug, Deserialize)]
pub struct Database {
    /// Connection URL connecting to the Postgres database. Required
    /// only if `storage.backend` is `postgres`.
    ///
    /// **Environment variables**:
    /// - `EMOBOARD_DB_URL` or `DATABASE_URL`
    #[serde(default)]
    pub url: Option<DatabaseUrl>,
    /// Minimum idle database connections just to avoid wasting
    /// hardware resources from the database server.
    ///
    /// **Environment variables**:
    /// - `EMOBOARD_DB_MIN_IDLE`
    #[serde(default)]
    pub min_idle: Option<NonZeroU32>,
    /// Maximum amount of pool size that database can handle
    ///
    /// **Environment variables**:
    /// - `EMOBOARD_DB_POOL_SIZE`
    #[serde(default = "Database::default_pool_size")]
    pub pool_size: NonZeroU32,
    /// Forces all database connections are encrypted with TLS
    /// (if possible).
    ///
    /// **Environment variables**:
    /// - `EMOBOARD_DB_ENFORCE_TLS`
    #[serde(default = "Database::default_enforce_tls")]
    pub enforce_tls: bool,
    /// How long this server can wait until its time limit where the
    /// database connection takes a while to acknowledge or
    /// successfully established.
    ///
    /// **Environment variables**:
    /// - `EMOBOARD_DB_TIMEOUT_SECS`
    #[serde(default = "Database::default_timeout_secs")]
    pub timeout_secs: NonZeroU64,
}

impl Default for Database {
    fn default() -> Self {
        Self {
            url: None,
            min_idle: None,
            pool_size: Self::default_pool_size(),
            enforce_tls: Self::default_enforce_tls(),
            timeout_secs: Self::default_timeout_secs(),
        }
    }
}

impl Database {
    const DEFAULT_POOL_SIZE: u32 = 5;
    const DEFAULT_TIMEOUT_SECS: u64 = 5;

    // Required by serde
    const fn default_pool_size() -> NonZeroU32 {
        match NonZeroU32::new(Self::DEFAULT_POOL_SIZE) {
            Some(n) => n,
            None => panic!("DEFAULT_POOL_SIZE is accidentally set to 0"),
        }
    }

    const fn default_timeout_secs() -> NonZeroU64 {
        match NonZeroU64::new(Self::DEFAULT_TIMEOUT_SECS) {
            Some(n) => n,
            None => panic!("DEFAULT_TIMEOUT_SECS is accidentally set to 0"),
        }
    }

    const fn default_enforce_tls() -> bool {
        true
    }
}

use error_stack::{Report, ResultExt};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use std::str::FromStr;
use std::time::Duration;

use super::error::{ErrorExt, ReportExt};
use crate::config;
use crate::store::{Error, Result};

pub type PoolConnection = sqlx::pool::PoolConnection<sqlx::Postgres>;

/// Connection pool of the `postgres` storage backend.
///
/// Connections are opened on demand. The pool may shrink down to no
/// connections at all when idle (unless `db.min_idle` is set), in which
/// case the next [`Pool::get`] opens a fresh one.
#[derive(Clone)]
pub struct Pool {
    pool: sqlx::PgPool,
}

impl Pool {
    /// Builds the pool and waits up to `db.timeout_secs` for the
    /// database to answer. A database that does not answer in time
    /// only gets a warning; a malformed url is an error.
    pub async fn new(cfg: &config::Database) -> Result<Self> {
        let Some(url) = cfg.url.as_ref() else {
            return Err(Report::new(Error::InvalidUrl).attach_printable("db.url is not set"));
        };

        let mut connect_opts =
            PgConnectOptions::from_str(url.expose()).change_context(Error::InvalidUrl)?;

        if cfg.enforce_tls {
            connect_opts = connect_opts.ssl_mode(PgSslMode::Prefer);
        }

        let mut pool_opts = PgPoolOptions::new()
            .acquire_timeout(Duration::from_secs(cfg.timeout_secs.get()))
            .max_connections(cfg.pool_size.get());

        if let Some(min_idle) = cfg.min_idle {
            pool_opts = pool_opts.min_connections(min_idle.get());
        }

        tracing::debug!(
            url = %url.redacted(),
            pool_size = cfg.pool_size.get(),
            "connecting to postgres"
        );

        let pool = Self {
            pool: pool_opts.connect_lazy_with(connect_opts),
        };

        match pool.get().await {
            Ok(..) => {}
            Err(error) if error.is_unhealthy() => {
                tracing::warn!("database did not answer in time, continuing anyway");
            }
            Err(error) => return Err(error),
        }

        Ok(pool)
    }

    #[must_use]
    pub fn inner(&self) -> &sqlx::PgPool {
        &self.pool
    }

    /// Takes a connection out of the pool, opening a new one if no idle
    /// connection is left. Gives up with [`Error::UnhealthyPool`] once
    /// `db.timeout_secs` runs out.
    #[tracing::instrument(name = "db.connect", skip(self))]
    pub async fn get(&self) -> Result<PoolConnection> {
        match self.pool.acquire().await {
            Ok(conn) => Ok(conn),
            Err(e @ sqlx::Error::PoolTimedOut) => Err(e).change_context(Error::UnhealthyPool),
            Err(e) => Err(e).into_db_error(),
        }
    }
}

impl std::fmt::Debug for Pool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pool")
            .field("size", &self.pool.size())
            .field("idle", &self.pool.num_idle())
            .finish()
    }
}

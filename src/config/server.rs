use error_stack::{Report, Result, ResultExt};
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use validator::Validate;

use super::{Database, Logging, Moderation, ParseError, Storage, StorageBackend};
use crate::util::{figment::FigmentErrorAttachable, validator::IntoValidatorReport};

#[derive(Debug, Deserialize, Validate)]
pub struct Server {
    /// **Environment variables**: `EMOBOARD_IP`
    #[serde(default = "Server::default_ip")]
    pub ip: IpAddr,
    /// **Environment variables**: `EMOBOARD_PORT`
    #[serde(default = "Server::default_port")]
    pub port: u16,
    /// Amount of HTTP workers. Defaults to the amount of
    /// available CPU cores.
    ///
    /// **Environment variables**: `EMOBOARD_WORKERS`
    #[serde(default = "Server::default_workers")]
    #[validate(range(min = 1, message = "There must be at least one worker"))]
    pub workers: usize,
    /// Largest accepted JSON request body in bytes. Posts may carry
    /// an embedded image as a data URL so this is generous.
    ///
    /// **Environment variables**: `EMOBOARD_JSON_LIMIT`
    #[serde(default = "Server::default_json_limit")]
    #[validate(range(min = 1024, message = "JSON limit must be at least 1 KiB"))]
    pub json_limit: usize,
    #[serde(default)]
    pub storage: Storage,
    #[serde(default)]
    pub db: Database,
    #[serde(default)]
    pub moderation: Moderation,
    #[serde(default)]
    pub logging: Logging,
}

impl Server {
    pub fn load() -> Result<Self, ParseError> {
        dotenvy::dotenv().ok();
        Self::from_figment(&Self::figment())
    }

    pub(crate) fn from_figment(figment: &figment::Figment) -> Result<Self, ParseError> {
        let config = figment
            .extract::<Self>()
            .map_err(|e| Report::new(ParseError).attach_figment_error(e))?;

        config
            .validate()
            .into_validator_report()
            .change_context(ParseError)?;

        config.check_storage()?;
        Ok(config)
    }

    /// Configuration used by tests: in-memory storage and the
    /// default moderation list.
    #[must_use]
    pub fn for_tests() -> Self {
        Self {
            ip: Self::default_ip(),
            port: 0,
            workers: 1,
            json_limit: Self::default_json_limit(),
            storage: Storage::default(),
            db: Database::default(),
            moderation: Moderation::default(),
            logging: Logging::default(),
        }
    }

    fn check_storage(&self) -> Result<(), ParseError> {
        if self.storage.backend != StorageBackend::Postgres {
            return Ok(());
        }

        let Some(url) = self.db.url.as_ref() else {
            return Err(Report::new(ParseError)
                .attach_printable("db.url is required for the postgres storage backend"));
        };

        let parsed = url
            .parse()
            .change_context(ParseError)
            .attach_printable("db.url: Invalid Postgres connection URL")?;

        if !matches!(parsed.scheme(), "postgres" | "postgresql") {
            return Err(Report::new(ParseError)
                .attach_printable("db.url: Invalid Postgres connection URL"));
        }

        Ok(())
    }
}

impl Server {
    const DEFAULT_CONFIG_FILE: &'static str = "emoboard.toml";
    const DEFAULT_PORT: u16 = 3000;
    const DEFAULT_JSON_LIMIT: usize = 10 * 1024 * 1024;

    const fn default_ip() -> IpAddr {
        IpAddr::V4(Ipv4Addr::LOCALHOST)
    }

    const fn default_port() -> u16 {
        Self::DEFAULT_PORT
    }

    fn default_workers() -> usize {
        std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get)
    }

    const fn default_json_limit() -> usize {
        Self::DEFAULT_JSON_LIMIT
    }

    /// Creates a default [`Figment`](figment::Figment) object to load
    /// server configuration. This function is there for [`Server::load`]
    /// and testing.
    pub(crate) fn figment() -> figment::Figment {
        use figment::{
            providers::{Env, Format, Toml},
            Figment,
        };

        Figment::new()
            .merge(Toml::file(Self::DEFAULT_CONFIG_FILE))
            // One big con about figment (env provider to be specific) especially
            // these fields with underscore in it.
            .merge(Env::prefixed("EMOBOARD_").map(|v| {
                match v.as_str().to_ascii_lowercase().as_str() {
                    "json_limit" => "json_limit".into(),

                    "db_min_idle" => "db.min_idle".into(),
                    "db_pool_size" => "db.pool_size".into(),
                    "db_enforce_tls" => "db.enforce_tls".into(),
                    "db_timeout_secs" => "db.timeout_secs".into(),

                    "storage_data_dir" => "storage.data_dir".into(),
                    "moderation_banned_words" => "moderation.banned_words".into(),

                    other => other.replace('_', ".").into(),
                }
            }))
            // Environment variable aliases
            .merge(Env::raw().only(&["DATABASE_URL"]).map(|_| "db.url".into()))
    }
}

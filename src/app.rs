use error_stack::{Result, ResultExt};
use std::sync::Arc;
use thiserror::Error;

use crate::config;
use crate::moderation::Filter;
use crate::store::{self, Backend, MemoryStore};

/// Shared state handed to every request handler.
#[derive(Debug, Clone)]
pub struct App {
    pub config: Arc<config::Server>,
    pub backend: Backend,
    pub moderation: Filter,
}

#[derive(Debug, Error)]
#[error("Failed to initialize App struct")]
pub struct AppError;

impl App {
    /// Opens the configured storage backend.
    #[tracing::instrument(skip_all)]
    pub async fn new(cfg: config::Server) -> Result<Self, AppError> {
        let backend = store::open(&cfg).await.change_context(AppError)?;
        Ok(Self::with_config(cfg, backend))
    }

    #[must_use]
    pub fn with_config(cfg: config::Server, backend: Backend) -> Self {
        Self {
            moderation: Filter::new(&cfg.moderation),
            config: Arc::new(cfg),
            backend,
        }
    }

    /// Swaps the storage backend, keeping everything else.
    #[must_use]
    pub fn with_backend(self, backend: Backend) -> Self {
        Self { backend, ..self }
    }

    /// In-memory app with the default test configuration.
    #[must_use]
    pub fn for_tests() -> Self {
        Self::with_config(
            config::Server::for_tests(),
            Backend::new(MemoryStore::new()),
        )
    }
}

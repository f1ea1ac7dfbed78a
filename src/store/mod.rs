//! Custody of the post collection and the moderation reports.
//!
//! Every backing medium implements the same two contracts:
//! [`PostStore`] for posts with their comments and reaction counters,
//! and [`ReportSink`] for write-only moderation reports. Which medium is
//! used is decided once at startup by [`open`].
//!
//! None of the media serialize a read-modify-write cycle against another
//! one issued concurrently, except [`MemoryStore`] which mutates under a
//! single write guard. Two concurrent reactions on the same post may
//! therefore record only one increment with the file and Postgres media.
use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;
use thiserror::Error;

use crate::config::{self, StorageBackend};
use crate::types::{Mood, Post, ReactionKind, Report};

pub mod file;
pub mod memory;
pub mod postgres;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use postgres::PostgresStore;

/// Storage related errors. All of them are storage faults from the
/// point of view of a client.
#[derive(Debug, Error)]
pub enum Error {
    /// The storage file could not be created, read or written.
    #[error("could not access the storage file")]
    Io,
    /// The storage file does not hold the expected JSON document.
    #[error("stored data is malformed")]
    Serialization,
    /// An error caused by an invalid Postgres connection url.
    #[error("invalid connection url")]
    InvalidUrl,
    /// An error caused by an [`sqlx`] error.
    #[error("received a database error")]
    Database,
    /// The database pool does not have reliable connection
    /// to transact to the database.
    #[error("unhealthy database pool")]
    UnhealthyPool,
    #[error("failed to perform database migrations")]
    Migration,
}

/// Lazily typed [`std::result::Result`] but the error generic
/// is filled up with [a storage error](Error).
pub type Result<T> = error_stack::Result<T, Error>;

#[async_trait]
pub trait PostStore: Debug + Send + Sync {
    /// Every post, newest first.
    async fn list_posts(&self) -> Result<Vec<Post>>;

    /// Stores a new post at the head of the collection and returns it.
    ///
    /// The caller is responsible for checking that the post has either
    /// content or an image.
    async fn create_post(
        &self,
        content: String,
        image_url: Option<String>,
        mood: Mood,
    ) -> Result<Post>;

    /// Bumps one reaction counter of a post by one.
    ///
    /// Returns `Ok(None)` if there is no post with the given id.
    async fn add_reaction(&self, post_id: &str, kind: ReactionKind) -> Result<Option<Post>>;

    /// Appends a comment to a post.
    ///
    /// Returns `Ok(None)` if there is no post with the given id.
    async fn add_comment(&self, post_id: &str, content: String) -> Result<Option<Post>>;
}

#[async_trait]
pub trait ReportSink: Debug + Send + Sync {
    /// Records a report against a post. The post is not required to exist.
    async fn submit_report(&self, post_id: String, reason: String) -> Result<Report>;
}

/// Store instances picked from the configuration.
#[derive(Debug, Clone)]
pub struct Backend {
    pub posts: Arc<dyn PostStore>,
    pub reports: Arc<dyn ReportSink>,
}

impl Backend {
    #[must_use]
    pub fn new<S>(store: S) -> Self
    where
        S: PostStore + ReportSink + 'static,
    {
        let store = Arc::new(store);
        Self {
            posts: store.clone(),
            reports: store,
        }
    }
}

/// Opens the backing medium named by `storage.backend`.
///
/// For Postgres this connects to the database and runs
/// pending migrations.
#[tracing::instrument(skip_all, fields(backend = %cfg.storage.backend))]
pub async fn open(cfg: &config::Server) -> Result<Backend> {
    let backend = match cfg.storage.backend {
        StorageBackend::Memory => Backend::new(MemoryStore::new()),
        StorageBackend::File => Backend::new(FileStore::new(&cfg.storage.data_dir)),
        StorageBackend::Postgres => Backend::new(PostgresStore::connect(&cfg.db).await?),
    };
    tracing::info!("Using {} storage backend", cfg.storage.backend);
    Ok(backend)
}

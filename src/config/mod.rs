use thiserror::Error;

mod database;
mod logging;
mod moderation;
mod server;
mod storage;

pub use database::Database;
pub use logging::{InvalidLoggingStyle, Logging, LoggingStyle};
pub use moderation::Moderation;
pub use server::Server;
pub use storage::{Storage, StorageBackend};

#[derive(Debug, Error)]
#[error("Failed to load configuration")]
pub struct ParseError;

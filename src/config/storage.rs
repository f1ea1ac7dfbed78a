use serde::Deserialize;
use std::fmt::Display;
use std::path::PathBuf;

/// Where posts, comments and reports are kept.
#[derive(Debug, Clone, Deserialize)]
pub struct Storage {
    /// Which backing medium to use.
    ///
    /// **Environment variables**:
    /// - `EMOBOARD_STORAGE_BACKEND`
    #[serde(default)]
    pub backend: StorageBackend,
    /// Directory holding `posts.json` and `reports.json` when the
    /// `file` backend is in use. It is created on first access.
    ///
    /// **Environment variables**:
    /// - `EMOBOARD_STORAGE_DATA_DIR`
    #[serde(default = "Storage::default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for Storage {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            data_dir: Self::default_data_dir(),
        }
    }
}

impl Storage {
    fn default_data_dir() -> PathBuf {
        PathBuf::from("data")
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process memory. Everything is gone after a restart.
    #[default]
    Memory,
    /// A pretty-printed JSON document per collection.
    File,
    /// `posts`, `comments` and `reports` tables in Postgres.
    Postgres,
}

impl Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Memory => f.write_str("memory"),
            Self::File => f.write_str("file"),
            Self::Postgres => f.write_str("postgres"),
        }
    }
}

use async_trait::async_trait;
use error_stack::ResultExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{Error, PostStore, ReportSink, Result};
use crate::types::{Comment, Mood, Post, ReactionKind, Report};

pub const POSTS_FILE: &str = "posts.json";
pub const REPORTS_FILE: &str = "reports.json";

/// Durable storage kept as two JSON documents inside a data directory:
/// `posts.json` holding every post (newest first) and `reports.json`
/// holding every report (oldest first).
///
/// Each operation reads the whole document, changes it and writes it
/// back in full. Nothing serializes these cycles, so a concurrent write
/// may overwrite another one. A new version is written next to the old
/// one and renamed over it, so readers never see a partial document.
#[derive(Debug, Clone)]
pub struct FileStore {
    posts_path: PathBuf,
    reports_path: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `data_dir`. Neither the directory nor
    /// the files are touched until they are first needed.
    #[must_use]
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        Self {
            posts_path: data_dir.join(POSTS_FILE),
            reports_path: data_dir.join(REPORTS_FILE),
        }
    }

    #[must_use]
    pub fn posts_path(&self) -> &Path {
        &self.posts_path
    }

    /// Reads every stored post, creating an empty collection
    /// if there is none yet.
    pub async fn read_posts(&self) -> Result<Vec<Post>> {
        read_document(&self.posts_path).await
    }

    pub async fn read_reports(&self) -> Result<Vec<Report>> {
        read_document(&self.reports_path).await
    }

    async fn write_posts(&self, posts: &[Post]) -> Result<()> {
        write_document(&self.posts_path, posts).await
    }

    async fn update_post<F>(&self, post_id: &str, mutate: F) -> Result<Option<Post>>
    where
        F: FnOnce(&mut Post) + Send,
    {
        let mut posts = self.read_posts().await?;
        let Some(post) = posts.iter_mut().find(|p| p.id == post_id) else {
            return Ok(None);
        };

        mutate(post);
        let post = post.clone();

        self.write_posts(&posts).await?;
        Ok(Some(post))
    }
}

#[async_trait]
impl PostStore for FileStore {
    #[tracing::instrument(skip_all, name = "file.list_posts")]
    async fn list_posts(&self) -> Result<Vec<Post>> {
        self.read_posts().await
    }

    #[tracing::instrument(skip_all, name = "file.create_post")]
    async fn create_post(
        &self,
        content: String,
        image_url: Option<String>,
        mood: Mood,
    ) -> Result<Post> {
        let mut posts = self.read_posts().await?;
        let post = Post::new(content, image_url, mood);
        posts.insert(0, post.clone());

        self.write_posts(&posts).await?;
        tracing::debug!(id = %post.id, "created post");
        Ok(post)
    }

    #[tracing::instrument(skip(self), name = "file.add_reaction")]
    async fn add_reaction(&self, post_id: &str, kind: ReactionKind) -> Result<Option<Post>> {
        self.update_post(post_id, |post| post.reactions.increment(kind))
            .await
    }

    #[tracing::instrument(skip(self, content), name = "file.add_comment")]
    async fn add_comment(&self, post_id: &str, content: String) -> Result<Option<Post>> {
        self.update_post(post_id, |post| post.comments.push(Comment::new(content)))
            .await
    }
}

#[async_trait]
impl ReportSink for FileStore {
    #[tracing::instrument(skip(self, reason), name = "file.submit_report")]
    async fn submit_report(&self, post_id: String, reason: String) -> Result<Report> {
        let mut reports = self.read_reports().await?;
        let report = Report::new(post_id, reason);
        reports.push(report.clone());

        write_document(&self.reports_path, &reports).await?;
        Ok(report)
    }
}

/// Ids that occur more than once in `posts`, with how many times
/// each of them occurs. Sorted by id.
#[must_use]
pub fn find_duplicate_ids(posts: &[Post]) -> Vec<(String, usize)> {
    let mut counts = HashMap::<&str, usize>::new();
    for post in posts {
        *counts.entry(post.id.as_str()).or_default() += 1;
    }

    let mut duplicates = counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(id, count)| (id.to_string(), count))
        .collect::<Vec<_>>();

    duplicates.sort();
    duplicates
}

async fn read_document<T: DeserializeOwned + Serialize>(path: &Path) -> Result<Vec<T>> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "creating empty storage file");
            write_document::<T>(path, &[]).await?;
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(e)
                .change_context(Error::Io)
                .attach_printable_lazy(|| format!("could not read {}", path.display()));
        }
    };

    serde_json::from_slice(&bytes)
        .change_context(Error::Serialization)
        .attach_printable_lazy(|| format!("could not parse {}", path.display()))
}

async fn write_document<T: Serialize>(path: &Path, items: &[T]) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .change_context(Error::Io)
            .attach_printable_lazy(|| format!("could not create {}", parent.display()))?;
    }

    let json = serde_json::to_vec_pretty(items).change_context(Error::Serialization)?;

    // readers only ever see a complete document, never a half written one
    let scratch = scratch_path(path);
    tokio::fs::write(&scratch, json)
        .await
        .change_context(Error::Io)
        .attach_printable_lazy(|| format!("could not write {}", scratch.display()))?;

    if let Err(error) = tokio::fs::rename(&scratch, path).await {
        if let Err(cleanup) = tokio::fs::remove_file(&scratch).await {
            tracing::warn!(path = %scratch.display(), %cleanup, "could not remove scratch file");
        }
        return Err(error)
            .change_context(Error::Io)
            .attach_printable_lazy(|| format!("could not replace {}", path.display()));
    }

    Ok(())
}

/// Unique sibling of `path` that a new version of the document is
/// written to before it replaces the old one.
fn scratch_path(path: &Path) -> PathBuf {
    const ALPHABET: &str = "0123456789abcdefghijklmnopqrstuvwxyz";

    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let suffix = random_string::generate(8, ALPHABET);
    path.with_file_name(format!(".{name}.{suffix}.tmp"))
}

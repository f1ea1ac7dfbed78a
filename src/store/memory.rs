use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{PostStore, ReportSink, Result};
use crate::types::{Comment, Mood, Post, ReactionKind, Report};

/// Transient storage kept in process memory.
///
/// The collection lives as long as the store instance does, which
/// is usually the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    // newest post first
    posts: RwLock<Vec<Post>>,
    reports: RwLock<Vec<Report>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports received so far, oldest first.
    pub async fn reports(&self) -> Vec<Report> {
        self.reports.read().await.clone()
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    #[tracing::instrument(skip_all, name = "memory.list_posts")]
    async fn list_posts(&self) -> Result<Vec<Post>> {
        Ok(self.posts.read().await.clone())
    }

    #[tracing::instrument(skip_all, name = "memory.create_post")]
    async fn create_post(
        &self,
        content: String,
        image_url: Option<String>,
        mood: Mood,
    ) -> Result<Post> {
        let post = Post::new(content, image_url, mood);
        self.posts.write().await.insert(0, post.clone());
        tracing::debug!(id = %post.id, "created post");
        Ok(post)
    }

    #[tracing::instrument(skip(self), name = "memory.add_reaction")]
    async fn add_reaction(&self, post_id: &str, kind: ReactionKind) -> Result<Option<Post>> {
        let mut posts = self.posts.write().await;
        let Some(post) = posts.iter_mut().find(|p| p.id == post_id) else {
            return Ok(None);
        };

        post.reactions.increment(kind);
        Ok(Some(post.clone()))
    }

    #[tracing::instrument(skip(self, content), name = "memory.add_comment")]
    async fn add_comment(&self, post_id: &str, content: String) -> Result<Option<Post>> {
        let mut posts = self.posts.write().await;
        let Some(post) = posts.iter_mut().find(|p| p.id == post_id) else {
            return Ok(None);
        };

        post.comments.push(Comment::new(content));
        Ok(Some(post.clone()))
    }
}

#[async_trait]
impl ReportSink for MemoryStore {
    #[tracing::instrument(skip(self, reason), name = "memory.submit_report")]
    async fn submit_report(&self, post_id: String, reason: String) -> Result<Report> {
        let report = Report::new(post_id, reason);
        self.reports.write().await.push(report.clone());
        Ok(report)
    }
}

use async_trait::async_trait;
use error_stack::ResultExt;
use sqlx::migrate::Migrator;
use std::collections::HashMap;
use tokio::time::Instant;

use super::{Error, PostStore, ReportSink, Result};
use crate::config;
use crate::types::{Comment, Mood, Post, ReactionKind, Report};

mod error;
mod pool;
mod rows;

pub use self::pool::{Pool, PoolConnection};

use self::error::ErrorExt;
use self::rows::{CommentRow, PostRow};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

const POST_COLUMNS: &str = "id, content, image_url, mood, created_at, react_understand, \
    react_lovely, react_emotional, react_healing, react_energized";

/// Durable storage kept in a Postgres database, with the posts,
/// comments and reports in tables of their own.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: Pool,
}

impl PostgresStore {
    /// Connects to the database and applies pending migrations.
    pub async fn connect(cfg: &config::Database) -> Result<Self> {
        let pool = Pool::new(cfg).await?;
        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    #[tracing::instrument(skip_all, name = "db.migrations")]
    async fn run_migrations(&self) -> Result<()> {
        let now = Instant::now();
        tracing::info!("Performing database migrations... (this may take a while)");

        MIGRATOR
            .run(self.pool.inner())
            .await
            .change_context(Error::Migration)?;

        let elapsed = now.elapsed();
        tracing::info!("Successfully performed database migrations! took {elapsed:.2?}");
        Ok(())
    }

    async fn find_post(&self, post_id: &str) -> Result<Option<Post>> {
        let mut conn = self.pool.get().await?;
        let query = format!("SELECT {POST_COLUMNS} FROM posts WHERE id = $1");
        let Some(row) = sqlx::query_as::<_, PostRow>(&query)
            .bind(post_id)
            .fetch_optional(&mut *conn)
            .await
            .into_db_error()?
        else {
            return Ok(None);
        };

        let comments = sqlx::query_as::<_, CommentRow>(
            "SELECT id, post_id, content, created_at FROM comments \
             WHERE post_id = $1 ORDER BY created_at, seq",
        )
        .bind(post_id)
        .fetch_all(&mut *conn)
        .await
        .into_db_error()?;

        let comments = comments.into_iter().map(Comment::from).collect();
        Ok(Some(row.into_post(comments)))
    }
}

#[async_trait]
impl PostStore for PostgresStore {
    #[tracing::instrument(skip_all, name = "db.list_posts")]
    async fn list_posts(&self) -> Result<Vec<Post>> {
        let mut conn = self.pool.get().await?;

        let query = format!("SELECT {POST_COLUMNS} FROM posts ORDER BY created_at DESC, seq DESC");
        let posts = sqlx::query_as::<_, PostRow>(&query)
            .fetch_all(&mut *conn)
            .await
            .into_db_error()?;

        let comments = sqlx::query_as::<_, CommentRow>(
            "SELECT id, post_id, content, created_at FROM comments ORDER BY created_at, seq",
        )
        .fetch_all(&mut *conn)
        .await
        .into_db_error()?;

        let mut by_post = HashMap::<String, Vec<Comment>>::new();
        for row in comments {
            by_post.entry(row.post_id.clone()).or_default().push(row.into());
        }

        Ok(posts
            .into_iter()
            .map(|row| {
                let comments = by_post.remove(&row.id).unwrap_or_default();
                row.into_post(comments)
            })
            .collect())
    }

    #[tracing::instrument(skip_all, name = "db.create_post")]
    async fn create_post(
        &self,
        content: String,
        image_url: Option<String>,
        mood: Mood,
    ) -> Result<Post> {
        let post = Post::new(content, image_url, mood);

        let mut conn = self.pool.get().await?;
        sqlx::query(
            "INSERT INTO posts (id, content, image_url, mood, created_at) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(&post.id)
        .bind(&post.content)
        .bind(&post.image_url)
        .bind(post.mood.as_str())
        .bind(post.created_at.into_inner())
        .execute(&mut *conn)
        .await
        .into_db_error()?;

        tracing::debug!(id = %post.id, "created post");
        Ok(post)
    }

    #[tracing::instrument(skip(self), name = "db.add_reaction")]
    async fn add_reaction(&self, post_id: &str, kind: ReactionKind) -> Result<Option<Post>> {
        let column = kind.column();

        // read then write, a concurrent increment may be lost
        {
            let mut conn = self.pool.get().await?;
            let current = sqlx::query_scalar::<_, i32>(&format!(
                "SELECT {column} FROM posts WHERE id = $1"
            ))
            .bind(post_id)
            .fetch_optional(&mut *conn)
            .await
            .into_db_error()?;

            let Some(current) = current else {
                return Ok(None);
            };

            sqlx::query(&format!("UPDATE posts SET {column} = $2 WHERE id = $1"))
                .bind(post_id)
                .bind(current.saturating_add(1))
                .execute(&mut *conn)
                .await
                .into_db_error()?;
        }

        self.find_post(post_id).await
    }

    #[tracing::instrument(skip(self, content), name = "db.add_comment")]
    async fn add_comment(&self, post_id: &str, content: String) -> Result<Option<Post>> {
        let comment = Comment::new(content);

        {
            let mut conn = self.pool.get().await?;
            let inserted = sqlx::query(
                "INSERT INTO comments (id, post_id, content, created_at) \
                 SELECT $1, id, $3, $4 FROM posts WHERE id = $2",
            )
            .bind(&comment.id)
            .bind(post_id)
            .bind(&comment.content)
            .bind(comment.created_at.into_inner())
            .execute(&mut *conn)
            .await
            .into_db_error()?;

            if inserted.rows_affected() == 0 {
                return Ok(None);
            }
        }

        self.find_post(post_id).await
    }
}

#[async_trait]
impl ReportSink for PostgresStore {
    #[tracing::instrument(skip(self, reason), name = "db.submit_report")]
    async fn submit_report(&self, post_id: String, reason: String) -> Result<Report> {
        let report = Report::new(post_id, reason);

        let mut conn = self.pool.get().await?;
        sqlx::query("INSERT INTO reports (id, post_id, reason, created_at) VALUES ($1, $2, $3, $4)")
            .bind(&report.id)
            .bind(&report.post_id)
            .bind(&report.reason)
            .bind(report.created_at.into_inner())
            .execute(&mut *conn)
            .await
            .into_db_error()?;

        Ok(report)
    }
}

use chrono::{DateTime, Utc};

use crate::types::{Comment, Mood, Post, Reactions};

#[derive(Debug, sqlx::FromRow)]
pub struct PostRow {
    pub id: String,
    pub content: String,
    pub image_url: Option<String>,
    pub mood: String,
    pub created_at: DateTime<Utc>,
    pub react_understand: i32,
    pub react_lovely: i32,
    pub react_emotional: i32,
    pub react_healing: i32,
    pub react_energized: i32,
}

impl PostRow {
    pub fn into_post(self, comments: Vec<Comment>) -> Post {
        Post {
            id: self.id,
            content: self.content,
            image_url: self.image_url,
            mood: Mood::from_tag(&self.mood),
            created_at: self.created_at.into(),
            reactions: Reactions {
                understand: counter(self.react_understand),
                lovely: counter(self.react_lovely),
                emotional: counter(self.react_emotional),
                healing: counter(self.react_healing),
                energized: counter(self.react_energized),
            },
            comments,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
pub struct CommentRow {
    pub id: String,
    pub post_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Self {
            id: row.id,
            content: row.content,
            created_at: row.created_at.into(),
        }
    }
}

// counters are never written negative
fn counter(value: i32) -> u32 {
    u32::try_from(value).unwrap_or_default()
}

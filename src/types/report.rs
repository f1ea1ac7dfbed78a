use serde::{Deserialize, Serialize};

use super::{id, Timestamp};

/// A moderation flag raised against a post. Reports are only ever
/// written; nothing in the server reads them back.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    pub post_id: String,
    pub reason: String,
    pub created_at: Timestamp,
}

impl Report {
    #[must_use]
    pub fn new(post_id: String, reason: String) -> Self {
        let created_at = Timestamp::now();
        Self {
            id: id::generate_at(created_at),
            post_id,
            reason,
            created_at,
        }
    }
}

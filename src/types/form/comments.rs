use serde::{Deserialize, Serialize};
use validator::Validate;

use super::non_empty;
use crate::types::Error;

#[derive(Debug, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub post_id: Option<String>,
    #[validate(length(
        max = 200,
        message = "Comment must be at most 200 characters"
    ))]
    pub content: Option<String>,
}

impl Request {
    pub fn require(&self) -> Result<(&str, &str), Error> {
        match (
            non_empty(self.post_id.as_deref()),
            non_empty(self.content.as_deref()),
        ) {
            (Some(post_id), Some(content)) => Ok((post_id, content)),
            _ => Err(Error::invalid_form_body("postId and content are required")),
        }
    }
}

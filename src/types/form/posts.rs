use serde::{Deserialize, Serialize};
use validator::Validate;

use super::non_empty;
use crate::types::{Error, Mood};

#[derive(Debug, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    #[validate(length(
        max = 500,
        message = "Content must be at most 500 characters"
    ))]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood: Option<Mood>,
}

/// Validated form of [`Request`].
#[derive(Debug, PartialEq, Eq)]
pub struct NewPost {
    pub content: String,
    pub image_url: Option<String>,
    pub mood: Mood,
}

impl Request {
    /// A post needs text, an image or both.
    pub fn require(self) -> Result<NewPost, Error> {
        let image_url = non_empty(self.image_url.as_deref()).map(str::to_string);
        let content = non_empty(self.content.as_deref()).map(str::to_string);
        if content.is_none() && image_url.is_none() {
            return Err(Error::invalid_form_body("Content or image is required"));
        }

        Ok(NewPost {
            content: content.unwrap_or_default(),
            image_url,
            mood: self.mood.unwrap_or_default(),
        })
    }
}

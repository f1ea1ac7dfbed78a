use serde::{Deserialize, Serialize};

use super::non_empty;
use crate::types::Error;

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub post_id: Option<String>,
    pub reason: Option<String>,
}

impl Request {
    pub fn require(&self) -> Result<(&str, &str), Error> {
        match (
            non_empty(self.post_id.as_deref()),
            non_empty(self.reason.as_deref()),
        ) {
            (Some(post_id), Some(reason)) => Ok((post_id, reason)),
            _ => Err(Error::invalid_form_body("postId and reason are required")),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub success: bool,
    pub report_id: String,
}

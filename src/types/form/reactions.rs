use serde::{Deserialize, Serialize};

use super::non_empty;
use crate::types::{Error, ReactionKind};

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub post_id: Option<String>,
    pub reaction_type: Option<String>,
}

impl Request {
    /// Checks that both fields are present and that the reaction
    /// is one of the five known kinds.
    pub fn require(&self) -> Result<(&str, ReactionKind), Error> {
        let (Some(post_id), Some(reaction_type)) = (
            non_empty(self.post_id.as_deref()),
            non_empty(self.reaction_type.as_deref()),
        ) else {
            return Err(Error::invalid_form_body(
                "postId and reactionType are required",
            ));
        };

        let kind = reaction_type
            .parse::<ReactionKind>()
            .map_err(|_| Error::invalid_form_body("Invalid reaction type"))?;

        Ok((post_id, kind))
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn request(post_id: Option<&str>, reaction_type: Option<&str>) -> Request {
        Request {
            post_id: post_id.map(str::to_string),
            reaction_type: reaction_type.map(str::to_string),
        }
    }

    #[test]
    fn test_require() {
        let form = request(Some("abc"), Some("lovely"));
        assert_eq!(form.require().unwrap(), ("abc", ReactionKind::Lovely));

        let error = request(None, Some("lovely")).require().unwrap_err();
        assert_eq!(error.message(), "postId and reactionType are required");

        let error = request(Some("abc"), Some("")).require().unwrap_err();
        assert_eq!(error.message(), "postId and reactionType are required");

        let error = request(Some("abc"), Some("bogus")).require().unwrap_err();
        assert_eq!(error.message(), "Invalid reaction type");
    }
}

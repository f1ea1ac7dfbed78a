use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

use super::{id, Timestamp};

/// A single entry on the board.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub mood: Mood,
    pub created_at: Timestamp,
    #[serde(default)]
    pub reactions: Reactions,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Post {
    /// Builds a fresh post with a generated id, zeroed reaction
    /// counters and no comments.
    #[must_use]
    pub fn new(content: String, image_url: Option<String>, mood: Mood) -> Self {
        let created_at = Timestamp::now();
        Self {
            id: id::generate_at(created_at),
            content,
            image_url,
            mood,
            created_at,
            reactions: Reactions::default(),
            comments: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub content: String,
    pub created_at: Timestamp,
}

impl Comment {
    #[must_use]
    pub fn new(content: String) -> Self {
        let created_at = Timestamp::now();
        Self {
            id: id::generate_at(created_at),
            content,
            created_at,
        }
    }
}

/// Reaction counters of a post. They only ever go up.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Reactions {
    pub understand: u32,
    pub lovely: u32,
    pub emotional: u32,
    pub healing: u32,
    pub energized: u32,
}

impl Reactions {
    #[must_use]
    pub const fn get(&self, kind: ReactionKind) -> u32 {
        match kind {
            ReactionKind::Understand => self.understand,
            ReactionKind::Lovely => self.lovely,
            ReactionKind::Emotional => self.emotional,
            ReactionKind::Healing => self.healing,
            ReactionKind::Energized => self.energized,
        }
    }

    pub fn get_mut(&mut self, kind: ReactionKind) -> &mut u32 {
        match kind {
            ReactionKind::Understand => &mut self.understand,
            ReactionKind::Lovely => &mut self.lovely,
            ReactionKind::Emotional => &mut self.emotional,
            ReactionKind::Healing => &mut self.healing,
            ReactionKind::Energized => &mut self.energized,
        }
    }

    /// Bumps the named counter by one. Saturates instead of wrapping.
    pub fn increment(&mut self, kind: ReactionKind) {
        let counter = self.get_mut(kind);
        *counter = counter.saturating_add(1);
    }
}

/// One of the five fixed reactions a visitor can leave on a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    /// わかる！
    Understand,
    /// 素敵！
    Lovely,
    /// エモい！
    Emotional,
    /// 癒される
    Healing,
    /// 元気もらった
    Energized,
}

impl ReactionKind {
    pub const ALL: [ReactionKind; 5] = [
        Self::Understand,
        Self::Lovely,
        Self::Emotional,
        Self::Healing,
        Self::Energized,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Understand => "understand",
            Self::Lovely => "lovely",
            Self::Emotional => "emotional",
            Self::Healing => "healing",
            Self::Energized => "energized",
        }
    }

    /// Column holding this counter in the `posts` table.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Understand => "react_understand",
            Self::Lovely => "react_lovely",
            Self::Emotional => "react_emotional",
            Self::Healing => "react_healing",
            Self::Energized => "react_energized",
        }
    }
}

impl Display for ReactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown {0:?} reaction type")]
pub struct InvalidReactionKind(String);

impl FromStr for ReactionKind {
    type Err = InvalidReactionKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| InvalidReactionKind(s.to_string()))
    }
}

/// Mood tag picked by the author of a post.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Touched,
    Nostalgic,
    Peaceful,
    Grateful,
    Hopeful,
    #[default]
    Default,
}

impl Mood {
    pub const ALL: [Mood; 7] = [
        Self::Happy,
        Self::Touched,
        Self::Nostalgic,
        Self::Peaceful,
        Self::Grateful,
        Self::Hopeful,
        Self::Default,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Touched => "touched",
            Self::Nostalgic => "nostalgic",
            Self::Peaceful => "peaceful",
            Self::Grateful => "grateful",
            Self::Hopeful => "hopeful",
            Self::Default => "default",
        }
    }

    /// Reads a mood tag, falling back to [`Mood::Default`] for anything
    /// outside of the vocabulary.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|mood| mood.as_str() == tag)
            .unwrap_or_default()
    }
}

impl Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// unknown tags in stored data or requests become `default`
impl<'de> Deserialize<'de> for Mood {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::from_tag(&tag))
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use serde_test::Token;

    #[test]
    fn test_new_post_is_blank() {
        let post = Post::new("hello".into(), None, Mood::default());
        assert_eq!(post.content, "hello");
        assert_eq!(post.mood, Mood::Default);
        assert_eq!(post.reactions, Reactions::default());
        assert!(post.comments.is_empty());
        assert!(post.image_url.is_none());
    }

    #[test]
    fn test_reactions_increment_only_named_counter() {
        let mut reactions = Reactions::default();
        reactions.increment(ReactionKind::Lovely);
        reactions.increment(ReactionKind::Lovely);

        for kind in ReactionKind::ALL {
            let expected = if kind == ReactionKind::Lovely { 2 } else { 0 };
            assert_eq!(reactions.get(kind), expected, "{kind}");
        }
    }

    #[test]
    fn test_reaction_kind_from_str() {
        assert_eq!(
            "healing".parse::<ReactionKind>().unwrap(),
            ReactionKind::Healing
        );
        assert!("bogus".parse::<ReactionKind>().is_err());
        assert!("Lovely".parse::<ReactionKind>().is_err());
    }

    #[test]
    fn test_mood_serde_impl() {
        serde_test::assert_ser_tokens(
            &Mood::Nostalgic,
            &[Token::UnitVariant {
                name: "Mood",
                variant: "nostalgic",
            }],
        );
        serde_test::assert_de_tokens(&Mood::Nostalgic, &[Token::Str("nostalgic")]);
        serde_test::assert_de_tokens(&Mood::Default, &[Token::Str("furious")]);
    }

    #[test]
    fn test_post_json_shape() {
        let post = Post {
            id: "lp39zc85abcdefghi".into(),
            content: "hello".into(),
            image_url: None,
            mood: Mood::Happy,
            created_at: Timestamp::from_millis(1_700_265_168_293),
            reactions: Reactions {
                lovely: 3,
                ..Default::default()
            },
            comments: vec![Comment {
                id: "lp39zc85jklmnopqr".into(),
                content: "nice!".into(),
                created_at: Timestamp::from_millis(1_700_265_168_300),
            }],
        };

        let value = serde_json::to_value(&post).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": "lp39zc85abcdefghi",
                "content": "hello",
                "mood": "happy",
                "createdAt": "2023-11-17T23:52:48.293Z",
                "reactions": {
                    "understand": 0,
                    "lovely": 3,
                    "emotional": 0,
                    "healing": 0,
                    "energized": 0,
                },
                "comments": [{
                    "id": "lp39zc85jklmnopqr",
                    "content": "nice!",
                    "createdAt": "2023-11-17T23:52:48.300Z",
                }],
            })
        );
    }
}

use serde::Deserialize;

/// Banned-substring filter applied to new comments.
#[derive(Debug, Clone, Deserialize)]
pub struct Moderation {
    /// Comments containing any of these (case-insensitively) are
    /// rejected with a gentle message instead of being stored.
    #[serde(default = "Moderation::default_banned_words")]
    pub banned_words: Vec<String>,
}

impl Default for Moderation {
    fn default() -> Self {
        Self {
            banned_words: Self::default_banned_words(),
        }
    }
}

impl Moderation {
    const DEFAULT_BANNED_WORDS: &'static [&'static str] =
        &["バカ", "アホ", "死ね", "うざい", "きもい", "クソ", "消えろ"];

    fn default_banned_words() -> Vec<String> {
        Self::DEFAULT_BANNED_WORDS
            .iter()
            .map(ToString::to_string)
            .collect()
    }
}

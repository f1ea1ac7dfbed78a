use crate::config;

/// Rejects comments containing any of the banned words.
///
/// Matching is a case-insensitive substring search, so a banned word
/// embedded in a longer word still counts.
#[derive(Debug, Clone)]
pub struct Filter {
    // lowercased, blank entries removed
    banned_words: Vec<String>,
}

impl Filter {
    #[must_use]
    pub fn new(cfg: &config::Moderation) -> Self {
        let banned_words = cfg
            .banned_words
            .iter()
            .map(|word| word.trim().to_lowercase())
            .filter(|word| !word.is_empty())
            .collect();

        Self { banned_words }
    }

    #[must_use]
    pub fn is_banned(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        self.banned_words.iter().any(|word| text.contains(word))
    }
}

impl Default for Filter {
    fn default() -> Self {
        Self::new(&config::Moderation::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_list() {
        let filter = Filter::default();
        assert!(filter.is_banned("お前はバカだ"));
        assert!(filter.is_banned("消えろ"));
        assert!(!filter.is_banned("素敵な写真ですね"));
        assert!(!filter.is_banned(""));
    }

    #[test]
    fn test_case_insensitive() {
        let filter = Filter::new(&config::Moderation {
            banned_words: vec!["Stupid".into(), "  ".into()],
        });
        assert!(filter.is_banned("you are STUPID"));
        assert!(filter.is_banned("stupidity"));
        assert!(!filter.is_banned("you are smart"));
    }

    #[test]
    fn test_empty_list_allows_everything() {
        let filter = Filter::new(&config::Moderation {
            banned_words: Vec::new(),
        });
        assert!(!filter.is_banned("バカ"));
    }
}

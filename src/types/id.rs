use crate::types::Timestamp;

const ALPHABET: &str = "0123456789abcdefghijklmnopqrstuvwxyz";
const RANDOM_SUFFIX_LEN: usize = 9;

/// Generates an opaque identifier for posts, comments and reports
/// created at `at`.
///
/// The identifier is the base-36 rendering of that time in milliseconds
/// followed by 9 random base-36 characters, so identifiers generated
/// later usually sort after earlier ones. Uniqueness relies on
/// the random suffix; nothing checks for collisions.
#[must_use]
pub fn generate_at(at: Timestamp) -> String {
    let mut id = to_base36(at.timestamp_millis().unsigned_abs());
    id.push_str(&random_string::generate(RANDOM_SUFFIX_LEN, ALPHABET));
    id
}

fn to_base36(mut value: u64) -> String {
    let digits = ALPHABET.as_bytes();
    if value == 0 {
        return "0".into();
    }

    let mut buf = Vec::new();
    while value > 0 {
        #[allow(clippy::cast_possible_truncation)]
        buf.push(digits[(value % 36) as usize]);
        value /= 36;
    }
    buf.reverse();

    // digits are all ASCII
    buf.into_iter().map(char::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1_700_265_168_293), "lp39zc85");
    }

    #[test]
    fn test_generate_shape() {
        let id = generate_at(Timestamp::from_millis(1_700_265_168_293));
        assert!(id.starts_with("lp39zc85"));
        assert_eq!(id.len(), 8 + RANDOM_SUFFIX_LEN);
        assert!(id.chars().all(|c| ALPHABET.contains(c)));
    }

    #[test]
    fn test_generate_is_unique_enough() {
        let ids = (0..1_000).map(|_| generate_at(Timestamp::now())).collect::<HashSet<_>>();
        assert_eq!(ids.len(), 1_000);
    }
}

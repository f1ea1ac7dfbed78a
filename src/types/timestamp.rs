use chrono::{DateTime, TimeZone, Utc};
use std::fmt::Display;
use std::ops::Deref;
use std::str::FromStr;
use thiserror::Error;

/// UTC point in time with millisecond precision.
///
/// It is serialized as an RFC 3339 string with exactly three fractional
/// digits and a `Z` suffix (e.g. `2024-05-01T09:30:12.345Z`), which is
/// how every `createdAt` field is written to clients and to `posts.json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Current time, truncated to whole milliseconds so that it survives
    /// a serialize/deserialize cycle unchanged.
    #[must_use]
    pub fn now() -> Self {
        Self::from_millis(Utc::now().timestamp_millis())
    }

    #[must_use]
    pub fn from_millis(millis: i64) -> Self {
        match Utc.timestamp_millis_opt(millis).single() {
            Some(dt) => Self(dt),
            None => Self(DateTime::<Utc>::default()),
        }
    }

    pub fn parse(input: &str) -> Result<Self, ParseError> {
        DateTime::parse_from_rfc3339(input)
            .map(|v| Self(v.with_timezone(&Utc)))
            .map_err(ParseError)
    }

    #[must_use]
    pub fn timestamp_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    #[must_use]
    pub const fn into_inner(self) -> DateTime<Utc> {
        self.0
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Timestamp {
    fn from(dt: DateTime<Tz>) -> Self {
        Self(dt.with_timezone(&Utc))
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = self.0.to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        s.fmt(f)
    }
}

impl Deref for Timestamp {
    type Target = DateTime<Utc>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromStr for Timestamp {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'de> serde::Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct Visitor;

        impl serde::de::Visitor<'_> for Visitor {
            type Value = Timestamp;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("RFC 3339 timestamp")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Timestamp::parse(v).map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_str(Visitor)
    }
}

impl serde::Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Error)]
#[error(transparent)]
pub struct ParseError(chrono::ParseError);

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use serde_test::Token;

    #[test]
    fn test_fmt_display_impl() {
        let timestamp = Timestamp::from_millis(1_700_265_168_293);
        assert_eq!("2023-11-17T23:52:48.293Z", timestamp.to_string());
    }

    #[test]
    fn test_serde_impl() {
        let timestamp = Timestamp::from_millis(1_700_265_168_293);
        serde_test::assert_tokens(&timestamp, &[Token::Str("2023-11-17T23:52:48.293Z")]);
    }

    #[test]
    fn test_parse_accepts_offsets() {
        let timestamp = Timestamp::parse("2023-11-18T07:52:48.293+08:00").unwrap();
        assert_eq!(timestamp.timestamp_millis(), 1_700_265_168_293);
    }

    #[test]
    fn test_now_has_no_sub_millisecond_part() {
        let now = Timestamp::now();
        assert_eq!(now.timestamp_subsec_nanos() % 1_000_000, 0);
        assert_eq!(Timestamp::parse(&now.to_string()).unwrap(), now);
    }
}

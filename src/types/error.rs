use serde::ser::SerializeStruct;
use std::borrow::Cow;
use std::fmt::Display;

/// Public error kinds sent back to clients.
///
/// Serialized as `{"type": "<kind>", "error": "<message>"}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The backing medium failed. The message names the operation
    /// that failed, never the cause.
    Internal(Cow<'static, str>),
    /// The request body is malformed or misses a required field.
    InvalidFormBody(Cow<'static, str>),
    /// The content tripped the banned-word filter.
    Moderated,
    /// The referenced post does not exist.
    NotFound,
}

impl Error {
    pub const MODERATED_MESSAGE: &'static str = "もっと優しい言葉で伝えてみませんか？💫";

    #[must_use]
    pub fn internal(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Internal(message.into())
    }

    #[must_use]
    pub fn invalid_form_body(message: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidFormBody(message.into())
    }

    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Internal(..) => "internal",
            Self::InvalidFormBody(..) => "invalid_form_body",
            Self::Moderated => "moderated",
            Self::NotFound => "not_found",
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Internal(message) | Self::InvalidFormBody(message) => message,
            Self::Moderated => Self::MODERATED_MESSAGE,
            Self::NotFound => "Post not found",
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl serde::Serialize for Error {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("Error", 2)?;
        state.serialize_field("type", self.kind())?;
        state.serialize_field("error", self.message())?;
        state.end()
    }
}

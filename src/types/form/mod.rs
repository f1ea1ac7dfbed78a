//! Request and response bodies of the HTTP API.
//!
//! Every required field is an `Option` so that a missing or empty field
//! produces the friendly "... are required" message instead of a raw
//! deserialization error.
pub mod comments;
pub mod posts;
pub mod reactions;
pub mod reports;

/// Treats `None` and `Some("")` alike, the same way the web client does.
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

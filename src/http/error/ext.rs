use error_stack::Context;

use super::Error;
use crate::types;

/// Turns a failed backend call into an internal [HTTP error](Error)
/// carrying the message shown to the client.
pub trait ResultExt<T> {
    fn or_internal(self, message: &'static str) -> super::Result<T>;
}

impl<T, C: Context> ResultExt<T> for error_stack::Result<T, C> {
    fn or_internal(self, message: &'static str) -> super::Result<T> {
        self.map_err(|report| Error::from_report(types::Error::internal(message), report))
    }
}

use error_stack::{Context, Report};
use std::fmt::Debug;
use tracing_error::SpanTrace;

use crate::types;

mod ext;
mod impls;

pub use self::ext::ResultExt;

pub type Result<T> = std::result::Result<T, Error>;

/// Error returned by every request handler.
///
/// It pairs the [public error kind](types::Error) that is sent back to
/// the client with the full diagnostic report and the span trace it was
/// raised in, which are only ever logged.
pub struct Error {
    error_type: types::Error,
    report: Box<dyn Debug + Send + Sync>,
    trace: SpanTrace,
}

impl Error {
    #[must_use]
    pub fn from_context(error_type: types::Error, context: impl Context) -> Self {
        Self::from_report(error_type, Report::new(context))
    }

    #[must_use]
    pub fn from_report(error_type: types::Error, report: Report<impl Context>) -> Self {
        Self {
            error_type,
            report: Box::new(report),
            trace: SpanTrace::capture(),
        }
    }

    /// Creates an error that has nothing more to say than its kind.
    #[must_use]
    pub fn from_type(error_type: types::Error) -> Self {
        #[derive(Debug, thiserror::Error)]
        #[error("Request rejected")]
        struct Rejected;

        Self::from_context(error_type, Rejected)
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Error")
            .field("type", &self.error_type)
            .field("report", &self.report)
            .field("trace", &self.trace)
            .finish()
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.error_type, f)
    }
}

impl From<types::Error> for Error {
    fn from(value: types::Error) -> Self {
        Self::from_type(value)
    }
}

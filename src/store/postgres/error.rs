use error_stack::Report;

use crate::store::{Error, Result};

/// Converts from a generic [sqlx] result into a [storage error](Error).
pub trait ErrorExt<T> {
    fn into_db_error(self) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, sqlx::Error> {
    fn into_db_error(self) -> Result<T> {
        self.map_err(|e| Report::new(e).change_context(Error::Database))
    }
}

/// Saves us from downcasting every time we want to know
/// whether the pool gave up on the database.
pub trait ReportExt {
    fn is_unhealthy(&self) -> bool;
}

impl ReportExt for Report<Error> {
    fn is_unhealthy(&self) -> bool {
        matches!(self.current_context(), Error::UnhealthyPool)
    }
}

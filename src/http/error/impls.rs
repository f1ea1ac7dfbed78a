use actix_web::{body::BoxBody, http::StatusCode, HttpResponse};
use validator::ValidationErrors;

use super::Error;
use crate::types::Error as ErrorType;
use crate::util::validator::flatten_errors;

impl actix_web::ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self.error_type {
            ErrorType::Internal(..) => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorType::NotFound => StatusCode::NOT_FOUND,
            ErrorType::InvalidFormBody(..) | ErrorType::Moderated => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        if let ErrorType::Internal(message) = &self.error_type {
            tracing::error!(report = ?self.report, trace = %self.trace, "{message}");
        } else {
            tracing::debug!(error = %self.error_type, "rejected request");
        }
        HttpResponse::build(self.status_code()).json(&self.error_type)
    }
}

impl From<ValidationErrors> for Error {
    fn from(value: ValidationErrors) -> Self {
        #[derive(Debug, thiserror::Error)]
        #[error("Validation error occurred")]
        struct ValidateError;

        let lines = flatten_errors(&value);
        let mut report = error_stack::Report::new(ValidateError);
        for line in &lines {
            report = report.attach_printable(line.clone());
        }

        // clients only get the messages, field paths stay in the report
        let message = lines
            .iter()
            .map(|line| line.split_once(": ").map_or(line.as_str(), |(_, msg)| msg))
            .collect::<Vec<_>>()
            .join(", ");

        Error::from_report(ErrorType::invalid_form_body(message), report)
    }
}

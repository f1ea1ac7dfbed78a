//! The `/api` HTTP surface.
use actix_web::web;

use crate::types;

pub mod controllers;
pub mod error;

pub use self::error::{Error, ResultExt};

/// Registers every route under `/api` together with the JSON body
/// limits and error handling. `json_limit` is in bytes.
pub fn configure(json_limit: usize) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        let json = web::JsonConfig::default()
            .limit(json_limit)
            .error_handler(|err, _req| {
                #[derive(Debug, thiserror::Error)]
                #[error("Could not parse JSON body")]
                struct JsonBodyError;

                let message = format!("Invalid JSON body: {err}");
                Error::from_report(
                    types::Error::invalid_form_body(message),
                    error_stack::Report::new(JsonBodyError),
                )
                .into()
            });

        cfg.service(
            web::scope("/api")
                .app_data(json)
                .configure(controllers::configure),
        );
    }
}

#[cfg(test)]
mod tests;

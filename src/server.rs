use actix_web::{web, HttpServer};
use error_stack::{Result, ResultExt};
use thiserror::Error;
use tracing::{debug, info};
use tracing_actix_web::TracingLogger;

use crate::{config, http, App};

#[derive(Debug, Error)]
#[error("Could not start the emoboard server")]
pub struct StartServerError;

/// Opens the storage backend and serves the HTTP API until the
/// process receives a termination signal.
#[tracing::instrument(skip_all, name = "server.run", fields(
    server.ip = %config.ip,
    server.port = %config.port,
    workers = %config.workers,
))]
pub async fn run(config: config::Server) -> Result<(), StartServerError> {
    if cfg!(debug_assertions) {
        info!("Starting server with config: {config:#?}");
    } else {
        debug!("Starting server...");
    }

    let app = App::new(config)
        .await
        .change_context(StartServerError)
        .attach_printable("could not open the storage backend")?;

    let config = app.config.clone();
    let json_limit = config.json_limit;

    let data = web::Data::new(app);
    let server = HttpServer::new(move || {
        actix_web::App::new()
            .wrap(TracingLogger::default())
            .app_data(data.clone())
            .configure(http::configure(json_limit))
    })
    .workers(config.workers)
    .bind((config.ip, config.port))
    .change_context(StartServerError)
    .attach_printable("could not bind server with address and port")?;

    for addr in server.addrs() {
        info!("emoboard server is listening at http://{addr}");
    }

    server.run().await.change_context(StartServerError)?;
    info!("Server stopped");

    Ok(())
}

use emoboard::config::Server as Config;
use emoboard::server::StartServerError;
use error_stack::{Result, ResultExt};

use clap::Parser;
use std::net::IpAddr;
use std::num::NonZeroUsize;

/// Expose the emoboard API HTTP server
#[derive(Debug, Parser)]
pub struct ServerCommand {
    #[clap(long)]
    pub address: Option<IpAddr>,
    #[clap(long)]
    pub port: Option<u16>,
    #[clap(long)]
    pub workers: Option<NonZeroUsize>,
}

pub fn run(args: ServerCommand) -> Result<(), StartServerError> {
    let mut config = Config::load().change_context(StartServerError)?;
    args.override_config(&mut config);

    emoboard::telemetry::init(&config.logging).change_context(StartServerError)?;
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .worker_threads(config.workers)
        .build()
        .change_context(StartServerError)
        .attach_printable("could not build tokio runtime")?
        .block_on(emoboard::server::run(config))
}

impl ServerCommand {
    fn override_config(&self, config: &mut Config) {
        // override server configurations if set by the cli
        if let Some(address) = self.address {
            config.ip = address;
        }

        if let Some(port) = self.port {
            config.port = port;
        }

        if let Some(workers) = self.workers {
            config.workers = workers.get();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_config() {
        let mut config = Config::for_tests();
        let args = ServerCommand::parse_from(["server", "--port", "8080", "--workers", "3"]);
        args.override_config(&mut config);

        assert_eq!(config.port, 8080);
        assert_eq!(config.workers, 3);
        assert_eq!(config.ip.to_string(), "127.0.0.1");
    }
}

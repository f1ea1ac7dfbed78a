use clap::Parser;
use error_stack::{Result, ResultExt};
use thiserror::Error;

mod check_duplicates;
mod server;

/// Command line options for emoboard.
#[derive(Debug, Parser)]
#[command(
    about = "Utility suite for the emoboard backend",
    version,
    author,
    long_about
)]
pub struct Cli {
    #[clap(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(Debug, Error)]
#[error("emoboard command failed")]
pub struct CliError;

impl Cli {
    pub fn run(self) -> Result<(), CliError> {
        match self.subcommand {
            Subcommand::Server(args) => self::server::run(args).change_context(CliError),
            Subcommand::CheckDuplicates(args) => {
                self::check_duplicates::run(args).change_context(CliError)
            }
        }
    }
}

#[derive(Debug, Parser)]
pub enum Subcommand {
    Server(self::server::ServerCommand),
    CheckDuplicates(self::check_duplicates::CheckDuplicatesCommand),
}

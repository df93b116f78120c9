use std::process::ExitCode;

use clap::Parser;

use config::{Cli, Command};

mod client;
mod commands;
mod config;
mod datamodel;
mod error;
mod logging;
mod server;
mod store;

#[cfg(test)]
mod tests;

#[tokio::main]
async fn main() -> ExitCode {
    // .env is optional
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    if let Err(e) = logging::init(&cli.log_level) {
        eprintln!("error: {e}");
        return ExitCode::FAILURE;
    }

    let result = match cli.command {
        None | Some(Command::Serve) => commands::serve(&cli.server).await,
        Some(Command::Schema) => {
            commands::schema();
            Ok(())
        }
        Some(Command::Books { client, action }) => commands::books(&client, action).await,
        Some(Command::Authors { client, action }) => commands::authors(&client, action).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "exiting");
            ExitCode::FAILURE
        }
    }
}

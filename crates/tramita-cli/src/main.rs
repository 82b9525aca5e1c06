mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tramita_api::ApiClient;
use tramita_core::Console;

use crate::cli::Cli;
use crate::config::FileSessionStore;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let console = build_console(&cli.global)?;

    tracing::debug!(command = ?cli.command, "dispatching command");
    commands::dispatch(cli.command, &console, &cli.global).await
}

/// Build the console from the layered config and the persisted session.
fn build_console(global: &cli::GlobalOpts) -> Result<Console, CliError> {
    let cfg = config::load_config(global)?;
    let base_url = cfg.base_url()?;

    let client = ApiClient::new(base_url, &cfg.transport()).map_err(|e| CliError::Config {
        message: format!("failed to build the HTTP client: {e}"),
    })?;

    Ok(Console::new(
        client,
        Box::new(FileSessionStore::at_default_path()),
    ))
}

//! dq-extract - Extract the active data quality rules from a Dataplex scan

use clap::Parser;

mod cli;
mod client;
mod config;
mod error;
mod output;

use cli::Cli;
use config::ExtractConfig;
use error::Result;
use output::console;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(cli).await {
        console::error(&err.to_string());
        if let Some(tip) = err.remediation() {
            eprintln!("{}", tip);
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = ExtractConfig::from_cli(&cli);
    config.validate()?;

    cli::extract::run(&config).await
}

/// Logs go to stderr; `RUST_LOG` overrides the level chosen here
fn init_logging(debug: bool) {
    let default_filter = if debug { "dq_extract=debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

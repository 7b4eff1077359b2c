use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, info};

mod cli;
mod config;
mod core;
mod extractors;

use cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Diagnostics go to stderr; stdout carries exactly one JSON object.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err)
            if err.kind() == clap::error::ErrorKind::DisplayHelp
                || err.kind() == clap::error::ErrorKind::DisplayVersion =>
        {
            let _ = err.print();
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            debug!("Invocation rejected: {}", err);
            println!("{}", cli::usage_error().to_json());
            return ExitCode::FAILURE;
        }
    };

    info!("Starting yt-transcript-fetcher v{}", env!("CARGO_PKG_VERSION"));

    // The fetch never escapes as an error; whatever happened is encoded in
    // the printed outcome and the process still exits 0.
    let outcome = cli.run().await;
    println!("{}", outcome.to_json());

    ExitCode::SUCCESS
}

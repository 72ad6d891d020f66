use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use vitae::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let options = &cli.options;

    match cli.command {
        Commands::Parse {
            file,
            format,
            pretty,
        } => vitae::cli::parse::run(options, &file, format, pretty).await,
        Commands::Batch { paths, dir, pretty } => {
            vitae::cli::batch::run(options, &paths, dir, pretty).await
        }
        Commands::Skills => vitae::cli::skills::run(options),
    }
}

mod cli;
mod config;
mod error;
mod installer;
mod platform;
mod progress;
mod release;
mod utils;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Args;
use crate::installer::Installer;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries only the resolved executable path
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if args.verbose {
        tracing::info!("Running codeql-up with verbose output");
    }

    let installer = Installer::new(args)?;
    installer.run().await?;

    Ok(())
}

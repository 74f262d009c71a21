mod cli;
mod commands;
mod config;
mod error;
mod output;
mod tracing_setup;

use anyhow::Result;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    cli::run().await
}

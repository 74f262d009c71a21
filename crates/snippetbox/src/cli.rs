//! Command-line interface for the snippet store.
//!
//! The database URL is resolved from CLI args, environment variables, or a
//! config file with precedence CLI > env > file > a SQLite file in the
//! user's data directory.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use snippetbox_storage::{create_storage, SnippetId, StorageError};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::commands;
use crate::config::AppConfig;
use crate::error::{
    exit_code_for_error, format_storage_error, InvalidInput, EXIT_ERROR, EXIT_USAGE,
};
use crate::tracing_setup;

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Parser)]
#[command(name = "snippetbox")]
#[command(about = "Store and share short-lived text snippets", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Database URL (sqlite://... or postgres://...)
    #[arg(long, global = true)]
    pub database_url: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress confirmations and notices (the id printed by create,
    /// the empty-list notice); requested snippets are still printed
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "table")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new snippet
    Create {
        /// Snippet title
        #[arg(long)]
        title: String,
        /// Snippet body
        #[arg(long)]
        content: String,
        /// Days until the snippet expires
        #[arg(long, default_value_t = 7)]
        expires: u32,
    },
    /// Show a live snippet by ID
    Show {
        /// Snippet ID
        id: SnippetId,
    },
    /// List the most recent live snippets
    Latest,
    /// Show effective configuration
    Config,
}

pub async fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    tracing_setup::init(cli.verbose);

    let config = match AppConfig::load(cli.config.as_ref(), cli.database_url.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            return Ok(ExitCode::from(EXIT_USAGE as u8));
        }
    };

    // Handle Config command early (doesn't need a database)
    if matches!(cli.command, Commands::Config) {
        println!("Database: {}", config.redacted_url());
        println!("Source: {}", config.source);
        return match config.storage_config() {
            Ok(storage_config) => {
                println!("Backend: {:?}", storage_config.backend);
                Ok(ExitCode::SUCCESS)
            }
            Err(e) => {
                eprintln!("Configuration error: {:#}", e);
                Ok(ExitCode::from(EXIT_USAGE as u8))
            }
        };
    }

    let storage_config = match config.storage_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            return Ok(ExitCode::from(EXIT_USAGE as u8));
        }
    };

    if let Err(e) = AppConfig::ensure_database_dir(&storage_config) {
        eprintln!("Error: {:#}", e);
        return Ok(ExitCode::from(EXIT_ERROR as u8));
    }

    let storage = match create_storage(&storage_config).await {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}", format_storage_error(&e));
            return Ok(ExitCode::from(exit_code_for_error(&e) as u8));
        }
    };

    let result = commands::handle(storage.as_ref(), cli.command, cli.format, cli.quiet).await;

    if let Err(e) = storage.close().await {
        tracing::warn!(error = %e, "failed to close storage");
    }

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            if let Some(err) = e.downcast_ref::<StorageError>() {
                eprintln!("{}", format_storage_error(err));
                Ok(ExitCode::from(exit_code_for_error(err) as u8))
            } else if let Some(err) = e.downcast_ref::<InvalidInput>() {
                eprintln!("Invalid input: {}", err);
                Ok(ExitCode::from(EXIT_USAGE as u8))
            } else {
                eprintln!("Error: {:#}", e);
                Ok(ExitCode::from(EXIT_ERROR as u8))
            }
        }
    }
}

//! # costwise-cli
//!
//! Command line front end for Costwise.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Parse arguments (clap)                                             │
//! │  2. Load AppConfig: defaults → costwise.toml → COSTWISE_* → --db       │
//! │  3. Initialize tracing (stderr)                                        │
//! │  4. Open the SQLite record store (runs migrations)                     │
//! │  5. Dispatch the command, print text or JSON to stdout                 │
//! │  6. On error: message to stderr, exit status from the error code       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod report;

use clap::Parser;
use tracing::{debug, info};

use crate::cli::Cli;
use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::report::Output;
use costwise_db::{Database, DbConfig};

/// Runs the binary and returns the process exit status.
pub async fn run() -> i32 {
    let cli = Cli::parse();
    let json = cli.json;

    match execute(cli).await {
        Ok(output) => {
            println!("{}", output);
            0
        }
        Err(err) => {
            if json {
                match serde_json::to_string_pretty(&err) {
                    Ok(body) => eprintln!("{}", body),
                    Err(_) => eprintln!("error: {}", err.message),
                }
            } else {
                eprintln!("error: {}", err.message);
            }
            err.exit_code()
        }
    }
}

async fn execute(cli: Cli) -> AppResult<String> {
    let config = AppConfig::load(cli.config.clone())?.with_database_path(cli.db.clone());
    logging::init_tracing(config.log_filter.as_deref(), cli.verbose);
    debug!(?config, "Configuration loaded");

    let db = open_database(&config).await?;
    let result = commands::dispatch(&db, cli.command, Output::new(cli.json, &config)).await;
    db.close().await;
    result
}

async fn open_database(config: &AppConfig) -> AppResult<Database> {
    if let Some(parent) = config.database_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::internal(format!(
                    "Cannot create database directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    info!(path = %config.database_path.display(), "Opening database");
    Ok(Database::new(DbConfig::new(config.database_path.clone())).await?)
}

//! Chainwait CLI - storage initialization and export tools.
//!
//! # Usage
//!
//! ```bash
//! # Create the configured storage backend (SQLite schema or CSV files)
//! cw-cli init-db
//!
//! # Print the signup roster as CSV, newest first
//! cw-cli export emails
//!
//! # Write a feedback bucket to a file
//! cw-cli export seller-feedback -o seller.csv
//! ```
//!
//! # Commands
//!
//! - `init-db` - Initialize the storage backend from the environment
//! - `export` - Dump a stored dataset as CSV
//!
//! Storage selection follows the server's environment variables
//! (`CHAINWAIT_STORAGE`, `CHAINWAIT_DATA_DIR`, `CHAINWAIT_DATABASE_URL`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "cw-cli")]
#[command(author, version, about = "Chainwait CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the configured storage backend
    InitDb,
    /// Dump a stored dataset as CSV
    Export {
        /// Dataset: `emails`, `user-feedback`, or `seller-feedback`
        kind: String,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::InitDb => commands::init_db::run().await?,
        Commands::Export { kind, output } => {
            commands::export::run(&kind, output.as_deref()).await?;
        }
    }
    Ok(())
}

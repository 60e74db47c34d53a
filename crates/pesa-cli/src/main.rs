//! Pesa CLI - M-PESA notification ledger
//!
//! Usage:
//!   pesa init                   Initialize database
//!   pesa ingest --file FILE     Ingest pasted notifications (stdin by default)
//!   pesa summary [CATEGORY]     Show spending summary
//!   pesa serve --port 8080      Start the chat webhook server

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db, cli.no_encrypt),
        Commands::Ingest { file, json } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            let text = commands::read_input(file.as_deref())?;
            commands::cmd_ingest(&db, commands::categories_from_env(), &text, json)
        }
        Commands::Summary {
            category,
            limit,
            json,
        } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_summary(
                &db,
                &commands::categories_from_env(),
                category.as_deref(),
                limit,
                json,
            )
        }
        Commands::Serve { port, host } => {
            commands::cmd_serve(&cli.db, &host, port, cli.no_encrypt).await
        }
    }
}

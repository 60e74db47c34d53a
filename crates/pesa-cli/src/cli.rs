//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Pesa - Track M-PESA spending from pasted notifications
#[derive(Parser)]
#[command(name = "pesa")]
#[command(about = "M-PESA notification ledger", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "transaction.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable database encryption (not recommended for production)
    ///
    /// By default, the database is encrypted using SQLCipher.
    /// Set PESA_DB_KEY environment variable with your passphrase.
    /// Use --no-encrypt only for development or testing.
    #[arg(long, global = true)]
    pub no_encrypt: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Ingest notification text, exactly as it would be pasted into chat
    ///
    /// Text holding several notifications is processed as a batch. Annotate
    /// each notification with `c: <category>` and optionally `r: <reason>`
    /// lines. Categories come from PESA_CATEGORIES (default: food, travel,
    /// savings, church, investments).
    Ingest {
        /// File to read (stdin if not given)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show spending per category, or recent transactions in one category
    Summary {
        /// Category to list
        category: Option<String>,

        /// Number of transactions to list for a category
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start the chat webhook server
    ///
    /// Requires DISCORD_BOT_TOKEN and DISCORD_CHANNEL_ID.
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
    },
}

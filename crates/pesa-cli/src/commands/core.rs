//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `categories_from_env` - The category set in effect
//! - `cmd_init` - Initialize the database

use std::path::Path;

use anyhow::{Context, Result};
use pesa_core::config::CATEGORIES_ENV;
use pesa_core::{CategorySet, Database};

/// Open database with encryption by default, or unencrypted if --no-encrypt
pub fn open_db(db_path: &Path, no_encrypt: bool) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .with_context(|| format!("Database path is not valid UTF-8: {}", db_path.display()))?;
    if no_encrypt {
        Database::new_unencrypted(path_str).context("Failed to open database (unencrypted)")
    } else {
        Database::new(path_str).context("Failed to open database")
    }
}

/// Categories from PESA_CATEGORIES, or the defaults
pub fn categories_from_env() -> CategorySet {
    std::env::var(CATEGORIES_ENV)
        .ok()
        .and_then(|list| CategorySet::parse_list(&list))
        .unwrap_or_default()
}

pub fn cmd_init(db_path: &Path, no_encrypt: bool) -> Result<()> {
    println!("Initializing database at {}...", db_path.display());

    let db = open_db(db_path, no_encrypt)?;
    let count = db
        .count_transactions()
        .context("Failed to read transactions table")?;
    println!("   Transactions stored: {}", count);

    if no_encrypt {
        println!("   Encryption: DISABLED (--no-encrypt)");
    } else {
        println!("   Encryption: ENABLED");
    }

    println!("Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Ingest notifications: pesa ingest --file messages.txt");
    println!("  2. Start the chat webhook: pesa serve");

    Ok(())
}

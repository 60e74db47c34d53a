//! Server command implementation

use std::path::Path;

use anyhow::{Context, Result};
use pesa_core::Config;
use pesa_server::ServerConfig;

use super::open_db;

pub async fn cmd_serve(db_path: &Path, host: &str, port: u16, no_encrypt: bool) -> Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;

    println!("Starting pesa webhook server...");
    println!("   Database: {}", db_path.display());
    println!("   Listening: http://{}:{}", host, port);
    println!("   Channel: {}", config.channel_id);
    println!("   Categories: {}", config.categories);

    let db = open_db(db_path, no_encrypt)?;

    let server_config = ServerConfig {
        bot: config.bot_config(),
        transport_connected: true,
    };

    pesa_server::serve(db, host, port, server_config).await
}

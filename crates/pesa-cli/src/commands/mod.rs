//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Core commands (init) and shared utilities (open_db, categories_from_env)
//! - `ingest` - Notification ingestion from a file or stdin
//! - `serve` - Chat webhook server command
//! - `summary` - Spending summaries

pub mod core;
pub mod ingest;
pub mod serve;
pub mod summary;

// Re-export command functions for main.rs
pub use core::*;
pub use ingest::*;
pub use serve::*;
pub use summary::*;

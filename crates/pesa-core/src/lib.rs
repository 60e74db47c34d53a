//! Pesa Core Library
//!
//! Shared functionality for the pesa M-PESA spending tracker:
//! - Notification parsing and batch segmentation
//! - Category/reason annotations and the closed category set
//! - Ingestion pipeline with duplicate detection and bounded retry
//! - Database access and migrations
//! - Chat message dispatch and spending summaries

pub mod bot;
pub mod category;
pub mod config;
pub mod db;
pub mod error;
pub mod ingest;
pub mod metadata;
pub mod models;
pub mod parser;
pub mod retry;
pub mod segment;
pub mod store;
pub mod summary;

pub use bot::{Bot, BotConfig, InboundMessage};
pub use category::CategorySet;
pub use config::Config;
pub use db::Database;
pub use error::{ConfigError, Error, IngestError, ParseError, Result, SaveError};
pub use ingest::Ingestor;
pub use metadata::Metadata;
pub use models::{
    BatchCandidate, BatchSummary, CategoryReport, CategoryTotal, Ingested, NewTransaction,
    Outcome, OutcomeKind, ParsedTransaction, SpendingSummary, Transaction,
};
pub use retry::{Backoff, RetryPolicy, Sleeper, ThreadSleeper};
pub use store::TransactionStore;

//! Error types for pesa

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Database pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Encryption error: {0}")]
    Encryption(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Failure to turn one notification string into a transaction.
///
/// `NotRecognized` is the common case (ordinary chat text); the remaining
/// variants mean the text had the right shape but a field would not convert.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("not a valid outgoing M-PESA message")]
    NotRecognized,

    #[error("failed to parse amount: {0}")]
    InvalidAmount(String),

    #[error("failed to parse balance: {0}")]
    InvalidBalance(String),

    #[error("failed to parse cost: {0}")]
    InvalidFee(String),

    #[error("failed to parse date/time: {0}")]
    InvalidDateTime(String),
}

/// Errors reported by a [`crate::store::TransactionStore`] when saving.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SaveError {
    /// A record with this transaction id is already stored
    #[error("transaction {0} already exists")]
    Duplicate(String),

    #[error("{0}")]
    Other(String),
}

impl From<Error> for SaveError {
    fn from(err: Error) -> Self {
        Self::Other(err.to_string())
    }
}

/// Single-message ingestion failures, first error wins.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IngestError {
    #[error("{0}")]
    ParseFailed(#[from] ParseError),

    #[error("Invalid category: {0}")]
    InvalidCategory(String),

    #[error("transaction {0} is already recorded")]
    Duplicate(String),

    #[error("failed to save transaction {transaction_id}: {reason}")]
    PersistFailed {
        transaction_id: String,
        reason: String,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
}

//! Domain models for pesa

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// An outgoing payment extracted from one M-PESA notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedTransaction {
    /// M-PESA reference code, e.g. `TIH5CRR635`
    pub transaction_id: String,
    pub amount: f64,
    /// Counterparty as written in the notification, whitespace-normalized
    pub recipient: String,
    pub timestamp: NaiveDateTime,
    /// Account balance stated in the notification after this payment
    pub balance_after: f64,
    /// Transaction cost charged by M-PESA
    pub fee: f64,
}

/// A transaction ready to be stored (parsed fields plus user annotations)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub transaction_id: String,
    pub amount: f64,
    pub recipient: String,
    pub timestamp: NaiveDateTime,
    pub balance_after: f64,
    pub fee: f64,
    /// Always lower-case
    pub category: String,
    pub reason: String,
}

impl NewTransaction {
    pub fn from_parsed(parsed: ParsedTransaction, category: &str, reason: &str) -> Self {
        Self {
            transaction_id: parsed.transaction_id,
            amount: parsed.amount,
            recipient: parsed.recipient,
            timestamp: parsed.timestamp,
            balance_after: parsed.balance_after,
            fee: parsed.fee,
            category: category.to_lowercase(),
            reason: reason.to_string(),
        }
    }
}

/// A stored transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub transaction_id: String,
    pub amount: f64,
    pub recipient: String,
    pub timestamp: NaiveDateTime,
    pub balance_after: f64,
    pub fee: f64,
    pub category: String,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

/// One notification found inside a chat message, with the metadata lines
/// that followed it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchCandidate {
    pub message: String,
    pub metadata: Vec<String>,
}

/// Identifying fields echoed back after a successful single ingestion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ingested {
    pub transaction_id: String,
    pub amount: f64,
    pub recipient: String,
    pub category: String,
}

/// What happened to one batch candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum OutcomeKind {
    Success { transaction_id: String },
    Duplicate { transaction_id: String },
    Failure { transaction_id: String, reason: String },
}

/// Outcome for the candidate at `position` (1-based)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub position: usize,
    #[serde(flatten)]
    pub kind: OutcomeKind,
}

impl Outcome {
    /// User-facing line used in batch replies
    pub fn message(&self) -> String {
        match &self.kind {
            OutcomeKind::Success { transaction_id } => {
                format!("{} [{}]", self.position, transaction_id)
            }
            OutcomeKind::Duplicate { transaction_id } => {
                format!("{} [{}] (duplicate)", self.position, transaction_id)
            }
            OutcomeKind::Failure {
                transaction_id,
                reason,
            } => format!("{} [{}]: {}", self.position, transaction_id, reason),
        }
    }
}

/// Aggregated result of ingesting a batch message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub success_count: usize,
    pub duplicate_count: usize,
    pub failure_count: usize,
    pub outcomes: Vec<Outcome>,
    pub successes: Vec<String>,
    pub duplicates: Vec<String>,
    pub failures: Vec<String>,
}

impl BatchSummary {
    /// True when segmentation found no candidates at all
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Record an outcome, keeping counts and message lists in step
    pub fn push(&mut self, outcome: Outcome) {
        let line = outcome.message();
        match outcome.kind {
            OutcomeKind::Success { .. } => {
                self.success_count += 1;
                self.successes.push(line);
            }
            OutcomeKind::Duplicate { .. } => {
                self.duplicate_count += 1;
                self.duplicates.push(line);
            }
            OutcomeKind::Failure { .. } => {
                self.failure_count += 1;
                self.failures.push(line);
            }
        }
        self.total += 1;
        self.outcomes.push(outcome);
    }
}

/// Total spend for one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

/// Totals across all categories that have data
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SpendingSummary {
    pub categories: Vec<CategoryTotal>,
    pub total: f64,
}

/// Recent transactions in one category
#[derive(Debug, Clone, Serialize)]
pub struct CategoryReport {
    pub category: String,
    /// Most recent first, capped at the requested limit
    pub transactions: Vec<Transaction>,
    /// Sum over `transactions` only
    pub total: f64,
    /// Number of stored transactions in the category, listed or not
    pub count: usize,
}

impl CategoryReport {
    /// How many transactions were left out of the listing
    pub fn remaining(&self) -> usize {
        self.count.saturating_sub(self.transactions.len())
    }
}

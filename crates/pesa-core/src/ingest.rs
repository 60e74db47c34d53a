//! Ingestion pipeline: notification text in, stored records out
//!
//! Each candidate goes parser → metadata → category check → store. A single
//! message fails fast on the first error. A batch message processes every
//! candidate regardless of earlier failures and reports one outcome per
//! candidate, in the order they appeared.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::category::CategorySet;
use crate::error::{IngestError, SaveError};
use crate::metadata;
use crate::models::{BatchCandidate, BatchSummary, Ingested, NewTransaction, Outcome, OutcomeKind};
use crate::parser;
use crate::retry::{RetryPolicy, Sleeper, ThreadSleeper};
use crate::segment;
use crate::store::TransactionStore;

#[derive(Clone)]
pub struct Ingestor<S> {
    store: S,
    categories: CategorySet,
    retry: RetryPolicy,
    sleeper: Arc<dyn Sleeper>,
}

impl<S: TransactionStore> Ingestor<S> {
    /// Pipeline with the default retry policy (3 attempts, 100ms apart)
    pub fn new(store: S, categories: CategorySet) -> Self {
        Self {
            store,
            categories,
            retry: RetryPolicy::default(),
            sleeper: Arc::new(ThreadSleeper),
        }
    }

    /// Replace the retry policy used for batch saves and the sleeper it waits with
    pub fn with_retry(mut self, retry: RetryPolicy, sleeper: Arc<dyn Sleeper>) -> Self {
        self.retry = retry;
        self.sleeper = sleeper;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Ingest a message holding one notification
    ///
    /// The first line is the notification, the remaining lines are
    /// annotations. The record is saved with a single attempt.
    pub fn ingest_one(&self, text: &str) -> Result<Ingested, IngestError> {
        let mut lines = text.lines();
        let first = lines.next().unwrap_or_default();
        let rest: Vec<&str> = lines.collect();

        let parsed = parser::parse(first)?;

        let meta = metadata::extract(&rest);
        if !self.categories.is_valid(&meta.category) {
            return Err(IngestError::InvalidCategory(meta.category));
        }

        let record = NewTransaction::from_parsed(parsed, &meta.category, &meta.reason);
        match self.store.save(&record) {
            Ok(_) => {
                info!(
                    transaction_id = %record.transaction_id,
                    amount = record.amount,
                    category = %record.category,
                    "Tracked transaction"
                );
                Ok(Ingested {
                    transaction_id: record.transaction_id,
                    amount: record.amount,
                    recipient: record.recipient,
                    category: record.category,
                })
            }
            Err(SaveError::Duplicate(id)) => Err(IngestError::Duplicate(id)),
            Err(SaveError::Other(detail)) => {
                warn!(transaction_id = %record.transaction_id, error = %detail, "Failed to save transaction");
                Err(IngestError::PersistFailed {
                    transaction_id: record.transaction_id,
                    reason: detail,
                })
            }
        }
    }

    /// Ingest every notification found in a batch message
    ///
    /// An empty summary means no notification boundary was found.
    pub fn ingest_batch(&self, text: &str) -> BatchSummary {
        let candidates = segment::segment(text);
        let mut summary = BatchSummary::default();

        for (index, candidate) in candidates.iter().enumerate() {
            summary.push(self.ingest_candidate(index + 1, candidate));
        }

        info!(
            total = summary.total,
            inserted = summary.success_count,
            duplicates = summary.duplicate_count,
            failed = summary.failure_count,
            "Batch processed"
        );
        summary
    }

    /// Process one batch candidate; never fails, the outcome says what happened
    pub fn ingest_candidate(&self, position: usize, candidate: &BatchCandidate) -> Outcome {
        let kind = match parser::parse(&candidate.message) {
            Err(e) => {
                let transaction_id = segment::extract_transaction_id(&candidate.message);
                debug!(position, %transaction_id, error = %e, "Candidate did not parse");
                OutcomeKind::Failure {
                    transaction_id,
                    reason: e.to_string(),
                }
            }
            Ok(parsed) => {
                let meta = metadata::extract(&candidate.metadata);
                if self.categories.is_valid(&meta.category) {
                    let record = NewTransaction::from_parsed(parsed, &meta.category, &meta.reason);
                    self.save_with_retry(&record)
                } else {
                    OutcomeKind::Failure {
                        transaction_id: parsed.transaction_id,
                        reason: format!("Invalid category '{}'", meta.category),
                    }
                }
            }
        };

        Outcome { position, kind }
    }

    fn save_with_retry(&self, record: &NewTransaction) -> OutcomeKind {
        let transaction_id = record.transaction_id.clone();
        let saved = self.retry.run(
            self.sleeper.as_ref(),
            |_| self.store.save(record),
            |e| matches!(e, SaveError::Duplicate(_)),
        );

        match saved {
            Ok(_) => {
                info!(%transaction_id, amount = record.amount, category = %record.category, "Tracked transaction");
                OutcomeKind::Success { transaction_id }
            }
            Err(SaveError::Duplicate(_)) => {
                debug!(%transaction_id, "Already recorded");
                OutcomeKind::Duplicate { transaction_id }
            }
            Err(SaveError::Other(reason)) => {
                warn!(%transaction_id, error = %reason, "Giving up on transaction");
                OutcomeKind::Failure {
                    transaction_id,
                    reason,
                }
            }
        }
    }
}

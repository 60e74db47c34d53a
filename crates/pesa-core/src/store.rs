//! Persistence interface used by ingestion and summaries
//!
//! [`crate::db::Database`] is the SQLite implementation. The store is the
//! single source of truth for "already recorded": uniqueness of
//! `transaction_id` is enforced there, not by callers.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{Result, SaveError};
use crate::models::{NewTransaction, Transaction};

pub trait TransactionStore: Send + Sync {
    /// Insert a new record, returning its row id
    ///
    /// Fails with [`SaveError::Duplicate`] if the transaction id is already stored.
    fn save(&self, tx: &NewTransaction) -> std::result::Result<i64, SaveError>;

    /// Transactions in a category, most recent first
    fn find_by_category(&self, category: &str) -> Result<Vec<Transaction>>;

    /// Total amount per category
    fn sum_amount_by_category(&self) -> Result<HashMap<String, f64>>;
}

impl<S: TransactionStore + ?Sized> TransactionStore for Arc<S> {
    fn save(&self, tx: &NewTransaction) -> std::result::Result<i64, SaveError> {
        (**self).save(tx)
    }

    fn find_by_category(&self, category: &str) -> Result<Vec<Transaction>> {
        (**self).find_by_category(category)
    }

    fn sum_amount_by_category(&self) -> Result<HashMap<String, f64>> {
        (**self).sum_amount_by_category()
    }
}

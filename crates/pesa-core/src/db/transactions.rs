//! Transaction operations

use std::collections::HashMap;

use chrono::NaiveDateTime;
use rusqlite::{params, OptionalExtension, Row};
use tracing::debug;

use super::{parse_created_at, Database, DATETIME_FORMAT};
use crate::error::{Error, Result, SaveError};
use crate::models::{NewTransaction, Transaction};
use crate::store::TransactionStore;

const SELECT_COLUMNS: &str = "id, transaction_id, amount, recipient, timestamp, balance_after, fee, category, reason, created_at";

/// True for a UNIQUE / PRIMARY KEY constraint failure
fn is_unique_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(e, _) => {
            e.code == rusqlite::ErrorCode::ConstraintViolation
                && matches!(
                    e.extended_code,
                    rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                        | rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                )
        }
        _ => false,
    }
}

/// Map a row selected with `SELECT_COLUMNS`
fn row_to_transaction(row: &Row<'_>) -> rusqlite::Result<Transaction> {
    let timestamp: String = row.get(4)?;
    let timestamp = NaiveDateTime::parse_from_str(&timestamp, DATETIME_FORMAT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, Box::new(e))
    })?;
    let created_at: String = row.get(9)?;

    Ok(Transaction {
        id: row.get(0)?,
        transaction_id: row.get(1)?,
        amount: row.get(2)?,
        recipient: row.get(3)?,
        timestamp,
        balance_after: row.get(5)?,
        fee: row.get(6)?,
        category: row.get(7)?,
        reason: row.get(8)?,
        created_at: parse_created_at(&created_at),
    })
}

impl Database {
    /// Insert a transaction; a second insert of the same transaction id is
    /// rejected as a duplicate
    pub fn insert_transaction(&self, tx: &NewTransaction) -> std::result::Result<i64, SaveError> {
        let conn = self.conn()?;

        let inserted = conn.execute(
            r#"
            INSERT INTO transactions (transaction_id, amount, recipient, timestamp, balance_after, fee, category, reason)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                tx.transaction_id,
                tx.amount,
                tx.recipient,
                tx.timestamp.format(DATETIME_FORMAT).to_string(),
                tx.balance_after,
                tx.fee,
                tx.category.to_lowercase(),
                tx.reason,
            ],
        );

        match inserted {
            Ok(_) => {
                let id = conn.last_insert_rowid();
                debug!(transaction_id = %tx.transaction_id, id, "Inserted transaction");
                Ok(id)
            }
            Err(e) if is_unique_violation(&e) => {
                Err(SaveError::Duplicate(tx.transaction_id.clone()))
            }
            Err(e) => Err(SaveError::Other(format!("failed to save transaction: {}", e))),
        }
    }

    /// Look up a transaction by its M-PESA reference
    pub fn get_transaction(&self, transaction_id: &str) -> Result<Option<Transaction>> {
        let conn = self.conn()?;
        let sql = format!(
            "SELECT {} FROM transactions WHERE transaction_id = ?",
            SELECT_COLUMNS
        );
        Ok(conn
            .query_row(&sql, params![transaction_id], row_to_transaction)
            .optional()?)
    }

    /// Most recent transactions across all categories
    pub fn list_transactions(&self, limit: i64) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let sql = format!(
            "SELECT {} FROM transactions ORDER BY timestamp DESC, id DESC LIMIT ?",
            SELECT_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params![limit], row_to_transaction)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Transactions in a category, most recent first
    pub fn get_transactions_by_category(&self, category: &str) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let sql = format!(
            "SELECT {} FROM transactions WHERE category = ? ORDER BY timestamp DESC, id DESC",
            SELECT_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params![category.trim().to_lowercase()], row_to_transaction)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Sum of amounts grouped by category
    pub fn get_category_totals(&self) -> Result<HashMap<String, f64>> {
        let conn = self.conn()?;
        let mut stmt =
            conn.prepare("SELECT category, SUM(amount) FROM transactions GROUP BY category")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?))
        })?;
        rows.collect::<rusqlite::Result<HashMap<String, f64>>>()
            .map_err(Error::from)
    }

    pub fn count_transactions(&self) -> Result<i64> {
        let conn = self.conn()?;
        Ok(conn.query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?)
    }
}

impl TransactionStore for Database {
    fn save(&self, tx: &NewTransaction) -> std::result::Result<i64, SaveError> {
        self.insert_transaction(tx)
    }

    fn find_by_category(&self, category: &str) -> Result<Vec<Transaction>> {
        self.get_transactions_by_category(category)
    }

    fn sum_amount_by_category(&self) -> Result<HashMap<String, f64>> {
        self.get_category_totals()
    }
}

//! Spending summaries computed from stored transactions

use crate::category::CategorySet;
use crate::error::Result;
use crate::models::{CategoryReport, CategoryTotal, SpendingSummary};
use crate::store::TransactionStore;

/// How many transactions a category report lists by default
pub const RECENT_LIMIT: usize = 10;

/// Totals per category, in category-set order
///
/// Categories with no stored transactions are left out. Stored categories
/// outside the set (e.g. after the set was reconfigured) are ignored.
pub fn category_totals<S>(store: &S, categories: &CategorySet) -> Result<SpendingSummary>
where
    S: TransactionStore + ?Sized,
{
    let sums = store.sum_amount_by_category()?;

    let mut summary = SpendingSummary::default();
    for category in categories.iter() {
        if let Some(&total) = sums.get(category) {
            summary.total += total;
            summary.categories.push(CategoryTotal {
                category: category.to_string(),
                total,
            });
        }
    }

    Ok(summary)
}

/// The most recent `limit` transactions in a category
pub fn category_report<S>(store: &S, category: &str, limit: usize) -> Result<CategoryReport>
where
    S: TransactionStore + ?Sized,
{
    let category = category.trim().to_lowercase();
    let mut transactions = store.find_by_category(&category)?;
    let count = transactions.len();
    transactions.truncate(limit);
    let total = transactions.iter().map(|t| t.amount).sum();

    Ok(CategoryReport {
        category,
        transactions,
        total,
        count,
    })
}

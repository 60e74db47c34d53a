//! Chat message dispatch
//!
//! [`Bot::handle`] takes one inbound chat message and returns the reply to
//! post back, or `None` when the message is not for us. Routing:
//!
//! - `!summary [category]` → spending summary
//! - more than one `<ID> Confirmed` boundary → batch ingestion
//! - anything else → single-notification ingestion

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::category::CategorySet;
use crate::error::IngestError;
use crate::ingest::Ingestor;
use crate::models::{BatchSummary, CategoryReport, Ingested, SpendingSummary};
use crate::segment;
use crate::store::TransactionStore;
use crate::summary::{self, RECENT_LIMIT};

const SUMMARY_COMMAND: &str = "!summary";

const SUMMARY_USAGE: &str = "Usage: !summary [category]\nExamples:\n!summary - show all categories\n!summary food - show food transactions";

/// A message delivered by the chat transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    pub channel_id: String,
    pub author_id: String,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct BotConfig {
    /// The only channel the bot listens to
    pub channel_id: String,
    /// The bot's own author id, so its replies are not processed again
    pub bot_user_id: Option<String>,
    pub categories: CategorySet,
}

pub struct Bot<S> {
    config: BotConfig,
    ingestor: Ingestor<S>,
}

impl<S: TransactionStore> Bot<S> {
    /// Bot backed by `store`, using the configured categories and default retry policy
    pub fn new(config: BotConfig, store: S) -> Self {
        let ingestor = Ingestor::new(store, config.categories.clone());
        Self { config, ingestor }
    }

    /// Bot with a pre-built ingestor (custom retry policy or sleeper)
    pub fn with_ingestor(config: BotConfig, ingestor: Ingestor<S>) -> Self {
        Self { config, ingestor }
    }

    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    /// Handle one inbound message, returning the reply text if any
    pub fn handle(&self, message: &InboundMessage) -> Option<String> {
        if self.config.bot_user_id.as_deref() == Some(message.author_id.as_str()) {
            return None;
        }
        if message.channel_id != self.config.channel_id {
            debug!(channel_id = %message.channel_id, "Ignoring message from other channel");
            return None;
        }

        let content = clean_content(&message.content);

        if content.starts_with(SUMMARY_COMMAND) {
            return Some(self.summary_command(&content));
        }

        if segment::is_batch(&content) {
            let summary = self.ingestor.ingest_batch(&content);
            return Some(render_batch(&summary));
        }

        Some(self.single(&content))
    }

    fn single(&self, content: &str) -> String {
        render_ingested(&self.ingestor.ingest_one(content), &self.config.categories)
    }

    fn summary_command(&self, content: &str) -> String {
        let args: Vec<&str> = content.split_whitespace().collect();
        let store = self.ingestor.store();

        match args.as_slice() {
            [_] => match summary::category_totals(store, &self.config.categories) {
                Ok(summary) => render_totals(&summary),
                Err(e) => {
                    warn!(error = %e, "Failed to compute summary");
                    format!("Failed to get summary: {}", e)
                }
            },
            [_, category] => {
                let category = category.to_lowercase();
                if !self.config.categories.is_valid(&category) {
                    return format!(
                        "Invalid category: {}. Use: {}",
                        category, self.config.categories
                    );
                }
                match summary::category_report(store, &category, RECENT_LIMIT) {
                    Ok(report) => render_report(&report),
                    Err(e) => {
                        warn!(error = %e, %category, "Failed to load transactions");
                        format!("Failed to get transactions: {}", e)
                    }
                }
            }
            _ => SUMMARY_USAGE.to_string(),
        }
    }
}

/// Strip characters that break notification parsing
///
/// Control characters and non-standard whitespace (non-breaking, zero-width
/// and similar) are removed. Space, `\n`, `\t` and `\r` are kept.
pub fn clean_content(input: &str) -> String {
    input
        .chars()
        .filter(|&c| match c {
            ' ' | '\n' | '\t' | '\r' => true,
            c if c.is_whitespace() || c.is_control() => false,
            '\u{00AD}' | '\u{200B}'..='\u{200F}' | '\u{202A}'..='\u{202E}' => false,
            '\u{2060}'..='\u{2064}' | '\u{FEFF}' => false,
            _ => true,
        })
        .collect()
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Reply for a single-notification ingestion
pub fn render_ingested(result: &Result<Ingested, IngestError>, categories: &CategorySet) -> String {
    match result {
        Ok(tx) => format!(
            "Tracked {}: Ksh{:.2} to {} in {}",
            tx.transaction_id, tx.amount, tx.recipient, tx.category
        ),
        Err(IngestError::ParseFailed(e)) => format!("Invalid Mpesa Message: {}", e),
        Err(IngestError::InvalidCategory(category)) => {
            format!("Invalid category: {}. Use: {}", category, categories)
        }
        Err(IngestError::Duplicate(id)) => format!("Transaction {} is already recorded", id),
        Err(IngestError::PersistFailed {
            transaction_id,
            reason,
        }) => format!("Failed to save transaction {}: {}", transaction_id, reason),
    }
}

pub fn render_batch(summary: &BatchSummary) -> String {
    if summary.is_empty() {
        return "No valid M-PESA transactions found in batch message".to_string();
    }

    let mut out = String::from("Batch Processing Complete\n");
    out.push_str(&format!(
        "Inserted: {}/{}\n",
        summary.success_count, summary.total
    ));
    if summary.duplicate_count > 0 {
        out.push_str(&format!(
            "Duplicates (skipped): {}\n",
            summary.duplicate_count
        ));
    }

    if !summary.successes.is_empty() {
        out.push_str("\nSucceeded:\n");
        for line in &summary.successes {
            out.push_str(&format!("- {}\n", line));
        }
    }

    if !summary.duplicates.is_empty() {
        out.push_str("\nDuplicates:\n");
        for line in &summary.duplicates {
            out.push_str(&format!("- {}\n", line));
        }
    }

    if summary.failure_count > 0 {
        out.push_str(&format!("\nFailed: {} transactions\n", summary.failure_count));
        out.push_str("Errors:\n");
        for line in &summary.failures {
            out.push_str(&format!("- {}\n", line));
        }
    }

    out
}

pub fn render_totals(summary: &SpendingSummary) -> String {
    if summary.categories.is_empty() {
        return "No transactions found.".to_string();
    }

    let mut out = String::from("Transaction Summary\n\n");
    for entry in &summary.categories {
        out.push_str(&format!(
            "{}: Ksh{:.2}\n",
            title_case(&entry.category),
            entry.total
        ));
    }
    out.push_str(&format!("\nTotal: Ksh{:.2}", summary.total));
    out
}

pub fn render_report(report: &CategoryReport) -> String {
    if report.transactions.is_empty() {
        return format!("No transactions found for category: {}", report.category);
    }

    let title = title_case(&report.category);
    let mut out = format!("{} Transactions\n\n", title);
    for tx in &report.transactions {
        out.push_str(&format!(
            "- Ksh{:.2} to {}\n  {} - {}\n\n",
            tx.amount,
            tx.recipient,
            tx.timestamp.format("%b %-d, %Y %-I:%M %p"),
            tx.reason
        ));
    }

    if report.remaining() > 0 {
        out.push_str(&format!(
            "... and {} more transactions\n\n",
            report.remaining()
        ));
    }

    out.push_str(&format!(
        "Total {}: Ksh{:.2} ({} transactions)",
        title, report.total, report.count
    ));
    out
}

//! Integration tests for pesa-core
//!
//! These tests exercise the full message → ingest → store → summary workflow
//! against a real SQLite database.

use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, Timelike};
use pesa_core::{
    db::Database,
    summary::{category_report, category_totals, RECENT_LIMIT},
    Bot, BotConfig, CategorySet, InboundMessage, IngestError, Ingestor, OutcomeKind, ParseError,
    RetryPolicy, Sleeper,
};

/// Sleeper that returns immediately
struct NoSleep;

impl Sleeper for NoSleep {
    fn sleep(&self, _duration: Duration) {}
}

fn ingestor(db: Database) -> Ingestor<Database> {
    Ingestor::new(db, CategorySet::default()).with_retry(RetryPolicy::default(), Arc::new(NoSleep))
}

/// A run of notifications pasted into one message: line breaks between some
/// of them, none between others, a promotional footer, and one mangled entry
fn pasted_batch() -> &'static str {
    "TIH5CRR635 Confirmed. Ksh1,500.00 sent to MAMA MBOGA 0712345678 on 17/9/25 at 6:56 PM. New M-PESA balance is Ksh3,210.50. Transaction cost, Ksh13.00.\n\
c: food\n\
r: groceries\n\
Download the M-PESA app for more\n\
\n\
TIH6ABC123 Confirmed. Ksh250.00 paid to KENYA POWER. on 18/9/25 at 8:05 AM.New business balance is Ksh2,960.50. Transaction cost, Ksh0.00.\n\
category: Travel\n\
TIH7BROKEN Confirmed. Ksh sent to nobody\n\
c: food\n\
TIH8DEF456 Confirmed. Ksh100.00 sent to JOHN DOE on 19/9/25 at 12:01 AM. New M-PESA balance is Ksh2,860.50. Transaction cost, Ksh0.00. TIH9GHI789 Confirmed. Ksh60.00 sent to MATATU SACCO on 19/9/25 at 7:30 AM. New M-PESA balance is Ksh2,800.50. Transaction cost, Ksh0.00.\n\
c: travel"
}

// =============================================================================
// Pipeline Integration Tests
// =============================================================================

#[test]
fn test_batch_workflow() {
    let db = Database::in_memory().expect("Failed to create database");
    let ingestor = ingestor(db.clone());

    let summary = ingestor.ingest_batch(pasted_batch());
    assert_eq!(summary.total, 5);
    assert_eq!(summary.success_count, 3);
    assert_eq!(summary.failure_count, 2);
    assert_eq!(summary.duplicate_count, 0);

    // Candidate 4 ran into candidate 5 on the same line and has no annotations
    assert_eq!(
        summary.failures,
        vec![
            "3 [TIH7BROKEN]: not a valid outgoing M-PESA message",
            "4 [TIH8DEF456]: Invalid category 'uncategorized'",
        ]
    );
    assert_eq!(
        summary.successes,
        vec!["1 [TIH5CRR635]", "2 [TIH6ABC123]", "5 [TIH9GHI789]"]
    );

    let stored = db
        .get_transaction("TIH5CRR635")
        .unwrap()
        .expect("first notification stored");
    assert_eq!(stored.amount, 1500.0);
    assert_eq!(stored.recipient, "MAMA MBOGA 0712345678");
    assert_eq!(stored.balance_after, 3210.50);
    assert_eq!(stored.fee, 13.0);
    assert_eq!(stored.category, "food");
    assert_eq!(stored.reason, "groceries");
    assert_eq!(
        stored.timestamp,
        NaiveDate::from_ymd_opt(2025, 9, 17)
            .unwrap()
            .and_hms_opt(18, 56, 0)
            .unwrap()
    );

    let paid = db.get_transaction("TIH6ABC123").unwrap().unwrap();
    assert_eq!(paid.recipient, "KENYA POWER");
    assert_eq!(paid.category, "travel");
    assert_eq!(paid.timestamp.hour(), 8);

    assert_eq!(db.count_transactions().unwrap(), 3);
}

#[test]
fn test_batch_resubmission_reports_duplicates() {
    let db = Database::in_memory().expect("Failed to create database");
    let ingestor = ingestor(db.clone());

    ingestor.ingest_batch(pasted_batch());
    let again = ingestor.ingest_batch(pasted_batch());

    assert_eq!(again.success_count, 0);
    assert_eq!(again.duplicate_count, 3);
    assert_eq!(again.failure_count, 2);
    assert!(again
        .outcomes
        .iter()
        .filter(|o| matches!(o.kind, OutcomeKind::Duplicate { .. }))
        .all(|o| [1, 2, 5].contains(&o.position)));
    assert_eq!(db.count_transactions().unwrap(), 3);
}

#[test]
fn test_single_then_batch_duplicate() {
    let db = Database::in_memory().expect("Failed to create database");
    let ingestor = ingestor(db.clone());

    let single = "TIH9GHI789 Confirmed. Ksh60.00 sent to MATATU SACCO on 19/9/25 at 7:30 AM. New M-PESA balance is Ksh2,800.50. Transaction cost, Ksh0.00.\nc: travel";
    let ingested = ingestor.ingest_one(single).unwrap();
    assert_eq!(ingested.transaction_id, "TIH9GHI789");
    assert_eq!(ingested.amount, 60.0);

    assert_eq!(
        ingestor.ingest_one(single).unwrap_err(),
        IngestError::Duplicate("TIH9GHI789".to_string())
    );

    let summary = ingestor.ingest_batch(pasted_batch());
    assert_eq!(summary.duplicates, vec!["5 [TIH9GHI789] (duplicate)"]);
}

#[test]
fn test_single_parse_errors() {
    let db = Database::in_memory().expect("Failed to create database");
    let ingestor = ingestor(db);

    assert_eq!(
        ingestor.ingest_one("received Ksh500 from a friend").unwrap_err(),
        IngestError::ParseFailed(ParseError::NotRecognized)
    );
}

#[test]
fn test_summaries_after_ingestion() {
    let db = Database::in_memory().expect("Failed to create database");
    let ingestor = ingestor(db.clone());
    ingestor.ingest_batch(pasted_batch());

    let totals = category_totals(&db, &CategorySet::default()).unwrap();
    let names: Vec<&str> = totals.categories.iter().map(|c| c.category.as_str()).collect();
    assert_eq!(names, vec!["food", "travel"]);
    assert_eq!(totals.categories[0].total, 1500.0);
    assert_eq!(totals.categories[1].total, 310.0);
    assert_eq!(totals.total, 1810.0);

    let travel = category_report(&db, "travel", RECENT_LIMIT).unwrap();
    assert_eq!(travel.count, 2);
    assert_eq!(travel.transactions[0].transaction_id, "TIH9GHI789");
    assert_eq!(travel.transactions[1].transaction_id, "TIH6ABC123");
}

// =============================================================================
// Bot Integration Tests
// =============================================================================

#[test]
fn test_bot_conversation() {
    let db = Database::in_memory().expect("Failed to create database");
    let bot = Bot::with_ingestor(
        BotConfig {
            channel_id: "wallet".to_string(),
            bot_user_id: Some("bot".to_string()),
            categories: CategorySet::default(),
        },
        ingestor(db),
    );
    let say = |content: &str| {
        bot.handle(&InboundMessage {
            channel_id: "wallet".to_string(),
            author_id: "me".to_string(),
            content: content.to_string(),
        })
    };

    let reply = say(pasted_batch()).unwrap();
    assert!(reply.contains("Inserted: 3/5"));
    assert!(reply.contains("Failed: 2 transactions"));

    let reply = say("!summary travel").unwrap();
    assert!(reply.starts_with("Travel Transactions\n\n- Ksh60.00 to MATATU SACCO\n  Sep 19, 2025 7:30 AM - \n"));
    assert!(reply.ends_with("Total Travel: Ksh310.00 (2 transactions)"));
}

// =============================================================================
// Database Integration Tests
// =============================================================================

#[test]
fn test_file_database_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("transaction.db");
    let path = path.to_string_lossy();

    {
        let db = Database::new_unencrypted(&path).unwrap();
        let summary = ingestor(db).ingest_batch(pasted_batch());
        assert_eq!(summary.success_count, 3);
    }

    let db = Database::new_unencrypted(&path).unwrap();
    assert_eq!(db.count_transactions().unwrap(), 3);
    assert!(!db.is_encrypted().unwrap());
}

#[test]
fn test_encrypted_database_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("secret.db");
    let path = path.to_string_lossy();

    {
        let db = Database::new_with_key(&path, Some("correct horse")).unwrap();
        ingestor(db).ingest_batch(pasted_batch());
    }

    let db = Database::new_with_key(&path, Some("correct horse")).unwrap();
    assert_eq!(db.count_transactions().unwrap(), 3);

    // Wrong passphrase cannot read the schema
    assert!(Database::new_with_key(&path, Some("wrong")).is_err());
}

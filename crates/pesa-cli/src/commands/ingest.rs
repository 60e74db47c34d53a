//! Ingest command implementation

use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use pesa_core::bot::{render_batch, render_ingested};
use pesa_core::{segment, BatchSummary, CategorySet, Database, IngestError, Ingested, Ingestor};

/// What happened to a piece of ingested text
pub enum IngestOutput {
    Single(std::result::Result<Ingested, IngestError>),
    Batch(BatchSummary),
}

/// Read text from a file, or stdin when no file is given
pub fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

/// Route text to single or batch ingestion, the same way chat messages are routed
pub fn ingest_text(db: &Database, categories: CategorySet, text: &str) -> IngestOutput {
    let text = pesa_core::bot::clean_content(text);
    let ingestor = Ingestor::new(db.clone(), categories);

    if segment::is_batch(&text) {
        IngestOutput::Batch(ingestor.ingest_batch(&text))
    } else {
        IngestOutput::Single(ingestor.ingest_one(&text))
    }
}

pub fn cmd_ingest(db: &Database, categories: CategorySet, text: &str, json: bool) -> Result<()> {
    match ingest_text(db, categories.clone(), text) {
        IngestOutput::Batch(summary) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", render_batch(&summary));
            }
            Ok(())
        }
        IngestOutput::Single(Ok(ingested)) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&ingested)?);
            } else {
                println!("{}", render_ingested(&Ok(ingested), &categories));
            }
            Ok(())
        }
        IngestOutput::Single(Err(e)) => {
            let reply = render_ingested(&Err(e), &categories);
            if json {
                println!("{}", serde_json::json!({ "error": reply }));
            }
            bail!(reply)
        }
    }
}

//! Summary command implementation

use anyhow::{bail, Context, Result};
use pesa_core::bot::{render_report, render_totals};
use pesa_core::summary::{category_report, category_totals};
use pesa_core::{CategorySet, Database};

pub fn cmd_summary(
    db: &Database,
    categories: &CategorySet,
    category: Option<&str>,
    limit: usize,
    json: bool,
) -> Result<()> {
    match category {
        None => {
            let summary = category_totals(db, categories).context("Failed to get summary")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{}", render_totals(&summary));
            }
        }
        Some(category) => {
            if !categories.is_valid(category) {
                bail!("Invalid category: {}. Use: {}", category, categories);
            }
            let report =
                category_report(db, category, limit).context("Failed to get transactions")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", render_report(&report));
            }
        }
    }

    Ok(())
}

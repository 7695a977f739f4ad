//! Team fund ledger: contributions and spending by date, with running totals

use crate::error::Result;
use anyhow::Context;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// One ledger line; negative amounts are spending
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundsEntry {
    pub date: NaiveDate,
    pub amount: f64,
    #[serde(default)]
    pub description: Option<String>,
}

/// Ledger totals for one date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundsTally {
    pub date: NaiveDate,
    /// Net amount recorded on this date
    pub amount: f64,
    /// Running balance up to and including this date
    pub total: f64,
    /// Non-empty descriptions for the date, joined with ", "
    pub description: String,
}

/// Ledger line as stored; the amount cell may be empty
#[derive(Deserialize)]
struct LedgerRow {
    date: NaiveDate,
    #[serde(default)]
    amount: Option<f64>,
    #[serde(default)]
    description: Option<String>,
}

/// Parse a JSON array of ledger entries, dropping rows without an amount
pub fn parse_ledger(raw: &str) -> Result<Vec<FundsEntry>> {
    let rows: Vec<LedgerRow> = serde_json::from_str(raw).context("Failed to parse funds ledger")?;
    let total = rows.len();
    let entries: Vec<FundsEntry> = rows
        .into_iter()
        .filter_map(|row| {
            row.amount.map(|amount| FundsEntry {
                date: row.date,
                amount,
                description: row.description,
            })
        })
        .collect();

    if entries.len() < total {
        debug!("Dropped {} ledger rows without an amount", total - entries.len());
    }
    Ok(entries)
}

pub fn load_ledger(path: &Path) -> Result<Vec<FundsEntry>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read funds ledger {}", path.display()))?;
    parse_ledger(&raw)
}

/// Per-date tallies in ascending date order
pub fn funds_tally(entries: &[FundsEntry]) -> Vec<FundsTally> {
    let mut by_date: BTreeMap<NaiveDate, (f64, Vec<&str>)> = BTreeMap::new();
    for entry in entries {
        let (amount, descriptions) = by_date.entry(entry.date).or_default();
        *amount += entry.amount;
        if let Some(description) = entry.description.as_deref().map(str::trim) {
            if !description.is_empty() {
                descriptions.push(description);
            }
        }
    }

    let mut total = 0.0;
    by_date
        .into_iter()
        .map(|(date, (amount, descriptions))| {
            total += amount;
            FundsTally {
                date,
                amount,
                total,
                description: descriptions.join(", "),
            }
        })
        .collect()
}

/// The most recent tally, if any
pub fn latest(tallies: &[FundsTally]) -> Option<&FundsTally> {
    tallies.last()
}

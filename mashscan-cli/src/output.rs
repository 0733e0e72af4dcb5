//! Display-side sorting, filtering and rendering of scan results.
//!
//! The scan keeps server order; everything here is presentation: newest
//! first, inclusive amount/date ranges re-applied on each display.

use chrono::{NaiveDate, NaiveDateTime};
use mashscan_extract::{CardTransaction, NeoTransaction};

/// Inclusive display filters. Empty bounds are open.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisplayFilter {
    pub min_amount: Option<f64>,
    pub max_amount: Option<f64>,
    pub since: Option<NaiveDate>,
    pub until: Option<NaiveDate>,
}

impl DisplayFilter {
    pub fn is_empty(&self) -> bool {
        self.min_amount.is_none()
            && self.max_amount.is_none()
            && self.since.is_none()
            && self.until.is_none()
    }

    /// True when the transaction falls inside every configured bound.
    /// `until` covers the whole named day.
    pub fn matches(&self, amount: f64, date: NaiveDateTime) -> bool {
        if let Some(min) = self.min_amount {
            if amount < min {
                return false;
            }
        }
        if let Some(max) = self.max_amount {
            if amount > max {
                return false;
            }
        }
        if let Some(since) = self.since {
            if date.date() < since {
                return false;
            }
        }
        if let Some(until) = self.until {
            if date.date() > until {
                return false;
            }
        }
        true
    }
}

/// Newest-first card listing, filtered.
pub fn prepare_cards(cards: &[CardTransaction], filter: &DisplayFilter) -> Vec<CardTransaction> {
    let mut rows: Vec<CardTransaction> = cards
        .iter()
        .filter(|txn| filter.matches(txn.amount, txn.date))
        .cloned()
        .collect();
    rows.sort_by(|a, b| b.date.cmp(&a.date));
    rows
}

/// Newest-first NEO listing, filtered.
pub fn prepare_neos(neos: &[NeoTransaction], filter: &DisplayFilter) -> Vec<NeoTransaction> {
    let mut rows: Vec<NeoTransaction> = neos
        .iter()
        .filter(|txn| filter.matches(txn.amount, txn.date))
        .cloned()
        .collect();
    rows.sort_by(|a, b| b.date.cmp(&a.date));
    rows
}

pub fn print_card_table(rows: &[CardTransaction]) {
    println!("Card transactions ({}):", rows.len());
    if rows.is_empty() {
        println!("  (none)");
        return;
    }
    println!(
        "  {:>12}  {:<30}  {:<6}  {:<20}  {:>14}",
        "AMOUNT", "VENDOR", "CARD", "DATE", "AVAIL. LIMIT"
    );
    for txn in rows {
        let limit = txn
            .available_limit
            .map(|l| format!("{l:.2}"))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:>12.2}  {:<30}  {:<6}  {:<20}  {:>14}",
            txn.amount,
            txn.vendor,
            txn.card_ending,
            txn.display_date(),
            limit
        );
    }
}

pub fn print_neo_table(rows: &[NeoTransaction]) {
    println!("NEO account transactions ({}):", rows.len());
    if rows.is_empty() {
        println!("  (none)");
        return;
    }
    println!("  {:>12}  {:<8}  {:<20}", "AMOUNT", "ACCOUNT", "DATE");
    for txn in rows {
        println!(
            "  {:>12.2}  {:<8}  {:<20}",
            txn.amount,
            txn.account,
            txn.display_date()
        );
    }
}

//! Mashreq card-spend notification parser.
//!
//! Expected body shape:
//!   Mashreq Bank transaction: Card ending with 1234 purchase of AED 123.45
//!   at Some Shop Dubai AE on 05-JAN-2024 02:30 PM. Available limit is AED 5,000.00

use std::sync::OnceLock;

use regex::Regex;

use crate::types::{parse_amount, parse_display_date, CardTransaction};

/// Literal phrases that gate the template before any field extraction runs.
const GATE_MARKERS: [&str; 3] = ["Mashreq Bank", "transaction", "purchase of AED"];

fn card_ending_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Card ending with (\d{4})").expect("valid card ending regex"))
}

fn amount_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"purchase of AED ([\d,]+\.\d{2})").expect("valid amount regex")
    })
}

fn vendor_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // Vendor name sits between "at" and the city/country marker before "on"
        Regex::new(r"(?i)at (.*?)\s+(?:Dubai|AE)\s+(?:AE)?\s+on").expect("valid vendor regex")
    })
}

fn date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"on (\d{2}-[A-Z]{3}-\d{4} \d{2}:\d{2} [AP]M)").expect("valid date regex")
    })
}

fn available_limit_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"Available limit is AED\s+([\d,]+\.\d{2})").expect("valid limit regex")
    })
}

/// Coarse template gate: all marker phrases must appear in the body.
pub fn matches_template(body: &str) -> bool {
    GATE_MARKERS.iter().all(|marker| body.contains(marker))
}

/// Extract a card transaction from a gated body.
///
/// `amount`, `vendor`, `date` and `card_ending` are mandatory; missing any of
/// them discards the whole record. `available_limit` is best-effort.
pub fn extract(body: &str) -> Option<CardTransaction> {
    if !matches_template(body) {
        return None;
    }

    let amount = amount_re()
        .captures(body)
        .and_then(|caps| parse_amount(&caps[1]))?;
    let vendor = vendor_re()
        .captures(body)
        .map(|caps| caps[1].trim().to_string())?;
    let date = date_re()
        .captures(body)
        .and_then(|caps| parse_display_date(&caps[1]))?;
    let card_ending = card_ending_re()
        .captures(body)
        .map(|caps| caps[1].to_string())?;

    let available_limit = available_limit_re()
        .captures(body)
        .and_then(|caps| parse_amount(&caps[1]));

    Some(CardTransaction {
        amount,
        vendor,
        card_ending,
        date,
        available_limit,
    })
}

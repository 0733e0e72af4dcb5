//! Mashreq NEO account notification parser.
//!
//! Expected body shape:
//!   Transaction notification on your Mashreq NEO Account:
//!   AED 250.00 credited to a/c no. XX0119876544321
//!
//! The template carries no timestamp in the body; the record's date comes
//! from the message's Date header.

use std::sync::OnceLock;

use regex::Regex;

use crate::types::{parse_amount, MessageMeta, NeoTransaction};

/// Literal phrase that gates the template.
const GATE_MARKER: &str = "Transaction notification on your Mashreq NEO Account";

fn amount_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"AED\s+([\d,]+\.?\d*)").expect("valid amount regex"))
}

fn account_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // Masked account number; only the last four digits are captured
        Regex::new(r"a/c no\. \w+(\d{4})").expect("valid account regex")
    })
}

/// Coarse template gate.
pub fn matches_template(body: &str) -> bool {
    body.contains(GATE_MARKER)
}

/// Extract a NEO transaction from a gated body plus header metadata.
///
/// `amount`, `account` and the header date are all mandatory; missing any of
/// them discards the record. A parsed amount of zero is valid.
pub fn extract(body: &str, meta: &MessageMeta) -> Option<NeoTransaction> {
    if !matches_template(body) {
        return None;
    }

    let amount = amount_re()
        .captures(body)
        .and_then(|caps| parse_amount(&caps[1]))?;
    let account = account_re()
        .captures(body)
        .map(|caps| caps[1].to_string())?;
    // Keep the sender's wall-clock time, reformatted to the display format
    let date = meta.date?.naive_local();

    Some(NeoTransaction {
        amount,
        account,
        date,
    })
}

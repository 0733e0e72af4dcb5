use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Timestamp format used across Mashreq notification emails and for display,
/// e.g. `05-Jan-2024 02:30 PM`.
pub const DISPLAY_DATE_FORMAT: &str = "%d-%b-%Y %I:%M %p";

/// A card purchase parsed from the bank's card-spend email template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardTransaction {
    pub amount: f64,
    pub vendor: String,
    pub card_ending: String,
    pub date: NaiveDateTime,
    /// Remaining card limit quoted in the email; not every template revision
    /// includes it.
    pub available_limit: Option<f64>,
}

/// A funds movement parsed from the NEO account notification template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeoTransaction {
    pub amount: f64,
    pub account: String,
    pub date: NaiveDateTime,
}

/// Either transaction kind, tagged for serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transaction {
    Card(CardTransaction),
    Neo(NeoTransaction),
}

/// Decoded header metadata for one message. The NEO template carries no
/// timestamp in the body, so its date comes from here.
#[derive(Debug, Clone, Default)]
pub struct MessageMeta {
    pub subject: Option<String>,
    pub date: Option<DateTime<FixedOffset>>,
}

impl CardTransaction {
    pub fn display_date(&self) -> String {
        self.date.format(DISPLAY_DATE_FORMAT).to_string()
    }
}

impl NeoTransaction {
    pub fn display_date(&self) -> String {
        self.date.format(DISPLAY_DATE_FORMAT).to_string()
    }
}

/// Parse a matched decimal string, stripping thousands separators.
pub fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim().replace(',', "").parse().ok()
}

/// Parse a body timestamp like `05-JAN-2024 02:30 PM`. Month names in the
/// emails are uppercase; chrono matches them case-insensitively.
pub fn parse_display_date(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), DISPLAY_DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount_strips_thousands_separators() {
        assert_eq!(parse_amount("5,000.00"), Some(5000.0));
        assert_eq!(parse_amount("123.45"), Some(123.45));
        assert_eq!(parse_amount(" 1,234,567.89 "), Some(1234567.89));
        assert_eq!(parse_amount("not a number"), None);
    }

    #[test]
    fn test_parse_display_date_accepts_uppercase_month() {
        let dt = parse_display_date("05-JAN-2024 02:30 PM").unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2024-01-05 14:30");
        // Round-trips through the display format (month case normalizes)
        assert_eq!(dt.format(DISPLAY_DATE_FORMAT).to_string(), "05-Jan-2024 02:30 PM");
    }

    #[test]
    fn test_parse_display_date_rejects_other_formats() {
        assert_eq!(parse_display_date("2024-01-05 14:30"), None);
        assert_eq!(parse_display_date(""), None);
    }

    #[test]
    fn test_transaction_serializes_with_kind_tag() {
        let txn = Transaction::Neo(NeoTransaction {
            amount: 250.0,
            account: "4321".to_string(),
            date: parse_display_date("05-JAN-2024 02:30 PM").unwrap(),
        });
        let json = serde_json::to_value(&txn).unwrap();
        assert_eq!(json["kind"], "neo");
        assert_eq!(json["account"], "4321");
        assert_eq!(json["amount"], 250.0);
    }
}

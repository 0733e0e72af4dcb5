//! Template dispatch: decide which email template a body matches and extract.

pub mod mashreq_card;
pub mod neo_account;

use crate::types::{MessageMeta, Transaction};

/// Run the matched template's extractor over one decoded message body.
///
/// Returns `None` when the body is empty, matches neither template gate, or
/// fails mandatory field extraction. The NEO gate is checked before the card
/// gate; a body matching it never falls through to the card patterns.
pub fn extract(body: &str, meta: &MessageMeta) -> Option<Transaction> {
    if body.trim().is_empty() {
        return None;
    }

    if neo_account::matches_template(body) {
        return neo_account::extract(body, meta).map(Transaction::Neo);
    }

    mashreq_card::extract(body).map(Transaction::Card)
}

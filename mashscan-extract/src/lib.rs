//! mashscan-extract: typed transaction records and the Mashreq email-template parsers.

pub mod templates;
pub mod types;

pub use templates::extract;
pub use types::{CardTransaction, MessageMeta, NeoTransaction, Transaction, DISPLAY_DATE_FORMAT};

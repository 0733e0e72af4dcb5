//! mashscan-mail: settings persistence, IMAP mail session and the scan
//! orchestrator that turns a mailbox into transaction records.

pub mod body;
pub mod error;
pub mod scan;
pub mod session;
pub mod settings;

pub use error::{Error, Result};
pub use scan::{scan, ScanReport};
pub use session::{MailSession, Transport, DEFAULT_FOLDER};
pub use settings::{Settings, SettingsStore};

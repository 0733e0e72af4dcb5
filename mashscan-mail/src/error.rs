//! Error types for the mail library.

use thiserror::Error;

/// Errors that can occur while loading settings or scanning a mailbox.
///
/// Per-message extraction failures are deliberately not represented here:
/// a message that matches no template is skipped, never an error.
#[derive(Debug, Error)]
pub enum Error {
    /// One or more of the four settings fields is empty.
    #[error("credentials incomplete: set username, password, imap_server and imap_port first")]
    MissingCredentials,

    /// The persisted port is not a number a connection can use.
    #[error("imap_port {0:?} is not a valid port number")]
    InvalidPort(String),

    /// Could not reach or authenticate with the mail server.
    #[error("failed to connect to {server}:{port}: {source}")]
    Connect {
        server: String,
        port: u16,
        #[source]
        source: imap::Error,
    },

    /// IMAP operation failed after connecting.
    #[error("IMAP error: {0}")]
    Imap(#[from] imap::Error),

    /// Settings file unreadable or unwritable.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file holds something other than the expected record.
    #[error("settings serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

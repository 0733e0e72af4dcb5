//! One IMAP connection: connect, list a folder, fetch messages.

use imap::{ClientBuilder, ConnectionMode, TlsKind};
use tracing::debug;

use crate::error::{Error, Result};
use crate::settings::Settings;

/// Folder scanned when none is named.
pub const DEFAULT_FOLDER: &str = "INBOX";

/// How the connection is secured. TLS is the default; plaintext exists for
/// local bridge endpoints that terminate encryption themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transport {
    #[default]
    Tls,
    Plaintext,
}

/// A logged-in IMAP session. One connection, no retry, no timeout beyond the
/// client library's defaults.
pub struct MailSession {
    session: imap::Session<imap::Connection>,
}

impl MailSession {
    /// Open a connection and authenticate with the stored credentials.
    pub fn connect(settings: &Settings, transport: Transport) -> Result<Self> {
        if !settings.has_credentials() {
            return Err(Error::MissingCredentials);
        }

        let port: u16 = settings
            .imap_port
            .trim()
            .parse()
            .map_err(|_| Error::InvalidPort(settings.imap_port.clone()))?;

        let mode = match transport {
            Transport::Tls => ConnectionMode::AutoTls,
            Transport::Plaintext => ConnectionMode::Plaintext,
        };

        let connect_error = |source: imap::Error| Error::Connect {
            server: settings.imap_server.clone(),
            port,
            source,
        };

        let client = ClientBuilder::new(settings.imap_server.as_str(), port)
            .tls_kind(TlsKind::Native)
            .mode(mode)
            .connect()
            .map_err(connect_error)?;

        let session = client
            .login(&settings.username, &settings.password)
            .map_err(|e| connect_error(e.0))?;

        debug!(server = %settings.imap_server, port, ?transport, "IMAP login ok");
        Ok(Self { session })
    }

    /// Select a folder and return every message's sequence number, in
    /// mailbox order.
    pub fn list_messages(&mut self, folder: &str) -> Result<Vec<u32>> {
        let mailbox = self.session.select(folder)?;
        debug!(folder, exists = mailbox.exists, "selected folder");
        if mailbox.exists == 0 {
            return Ok(Vec::new());
        }
        let mut seqs: Vec<u32> = self.session.search("ALL")?.into_iter().collect();
        seqs.sort_unstable();
        Ok(seqs)
    }

    /// Download one message's full RFC822 content. `None` when the server
    /// returns no body for the sequence number.
    pub fn fetch(&mut self, seq: u32) -> Result<Option<Vec<u8>>> {
        let fetches = self.session.fetch(seq.to_string(), "(RFC822)")?;
        Ok(fetches
            .iter()
            .find_map(|fetch| fetch.body())
            .map(|body| body.to_vec()))
    }

    /// Best-effort logout; the connection drops either way.
    pub fn logout(mut self) {
        let _ = self.session.logout();
    }
}

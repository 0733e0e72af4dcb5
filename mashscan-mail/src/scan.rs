//! The scan orchestrator: settings -> session -> fetch-and-extract loop.

use serde::Serialize;
use tracing::{info, warn};

use mashscan_extract::{extract, CardTransaction, NeoTransaction, Transaction};

use crate::body;
use crate::error::{Error, Result};
use crate::session::{MailSession, Transport};
use crate::settings::SettingsStore;

/// Outcome of one full mailbox scan. Both sequences keep the order messages
/// came back from the server; sorting is a display concern.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    pub cards: Vec<CardTransaction>,
    pub neos: Vec<NeoTransaction>,
    /// Messages fetched and inspected.
    pub messages_seen: usize,
    /// Messages that matched no template or could not be read.
    pub unmatched: usize,
}

impl ScanReport {
    /// Inspect one raw RFC822 message and file any extracted transaction.
    /// A message that cannot be parsed counts as unmatched, never as an
    /// error; one malformed email must not abort the scan.
    pub fn absorb(&mut self, raw: &[u8]) {
        self.messages_seen += 1;

        let parsed = match mailparse::parse_mail(raw) {
            Ok(parsed) => parsed,
            Err(error) => {
                warn!(%error, "skipping unparseable message");
                self.unmatched += 1;
                return;
            }
        };

        let meta = body::message_meta(&parsed);
        let Some(text) = body::plain_text_body(&parsed) else {
            self.unmatched += 1;
            return;
        };

        match extract(&text, &meta) {
            Some(Transaction::Card(txn)) => self.cards.push(txn),
            Some(Transaction::Neo(txn)) => self.neos.push(txn),
            None => self.unmatched += 1,
        }
    }
}

/// Scan the whole folder once, sequentially, blocking until done.
///
/// Every call re-fetches and re-parses everything; there is no cache, no
/// delta scan and no de-duplication across runs. Incomplete credentials and
/// connection failures are distinct errors, so an empty report always means
/// the mailbox really held no matching messages.
pub fn scan(store: &SettingsStore, transport: Transport, folder: &str) -> Result<ScanReport> {
    let settings = store.load()?;
    if !settings.has_credentials() {
        return Err(Error::MissingCredentials);
    }

    let mut session = MailSession::connect(&settings, transport)?;
    let seqs = session.list_messages(folder)?;
    info!(folder, count = seqs.len(), "scanning mailbox");

    let mut report = ScanReport::default();
    for seq in seqs {
        match session.fetch(seq) {
            Ok(Some(raw)) => report.absorb(&raw),
            Ok(None) => {
                warn!(seq, "fetch returned no body, skipping");
                report.unmatched += 1;
            }
            Err(error) => {
                warn!(seq, %error, "fetch failed, skipping");
                report.unmatched += 1;
            }
        }
    }
    session.logout();

    info!(
        cards = report.cards.len(),
        neos = report.neos.len(),
        unmatched = report.unmatched,
        "scan finished"
    );
    Ok(report)
}

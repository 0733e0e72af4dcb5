use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::info;

use mashscan_mail::{scan, Error, Settings, SettingsStore, Transport, DEFAULT_FOLDER};

mod output;

use output::DisplayFilter;

#[derive(Parser, Debug)]
#[command(
    name = "mashscan",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("MASHSCAN_BUILD_SHA"), ")"),
    about = "Scan a mailbox for Mashreq transaction notification emails"
)]
struct Cli {
    /// Settings file (default: ~/.mashscan/settings.json)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan the mailbox and list extracted transactions
    Scan {
        /// Folder to scan
        #[arg(long, default_value = DEFAULT_FOLDER)]
        folder: String,

        /// Connect without TLS (local bridge endpoints only)
        #[arg(long)]
        plaintext: bool,

        /// Emit the full report as JSON instead of tables
        #[arg(long)]
        json: bool,

        /// Only show transactions with amount >= this value (inclusive)
        #[arg(long)]
        min_amount: Option<f64>,

        /// Only show transactions with amount <= this value (inclusive)
        #[arg(long)]
        max_amount: Option<f64>,

        /// Only show transactions on or after this date (YYYY-MM-DD)
        #[arg(long)]
        since: Option<NaiveDate>,

        /// Only show transactions up to the end of this date (YYYY-MM-DD)
        #[arg(long)]
        until: Option<NaiveDate>,
    },

    /// Manage the stored connection settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommand,
    },
}

#[derive(Subcommand, Debug)]
enum SettingsCommand {
    /// Create the settings file with empty defaults if it does not exist
    Init,

    /// Print the stored settings (password redacted)
    Show,

    /// Update fields of the stored settings
    Set {
        #[arg(long)]
        username: Option<String>,

        #[arg(long)]
        password: Option<String>,

        #[arg(long)]
        imap_server: Option<String>,

        #[arg(long)]
        imap_port: Option<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mashscan_cli=info,mashscan_mail=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let store = match &cli.settings {
        Some(path) => SettingsStore::new(path.clone()),
        None => SettingsStore::open_default().context("resolving default settings path")?,
    };

    match cli.command {
        Command::Scan {
            folder,
            plaintext,
            json,
            min_amount,
            max_amount,
            since,
            until,
        } => {
            let transport = if plaintext {
                Transport::Plaintext
            } else {
                Transport::Tls
            };
            let filter = DisplayFilter {
                min_amount,
                max_amount,
                since,
                until,
            };
            run_scan(&store, transport, &folder, json, &filter)?;
        }

        Command::Settings { command } => match command {
            SettingsCommand::Init => {
                let settings = store.load()?;
                println!("Settings file: {}", store.path().display());
                if !settings.has_credentials() {
                    println!("Fill it in with: mashscan settings set --username ... --password ... --imap-server ... --imap-port ...");
                }
            }
            SettingsCommand::Show => {
                let settings = store.load()?;
                println!("Settings file: {}", store.path().display());
                println!("username:    {}", settings.username);
                println!("password:    {}", if settings.password.is_empty() { "" } else { "[REDACTED]" });
                println!("imap_server: {}", settings.imap_server);
                println!("imap_port:   {}", settings.imap_port);
            }
            SettingsCommand::Set {
                username,
                password,
                imap_server,
                imap_port,
            } => {
                if username.is_none()
                    && password.is_none()
                    && imap_server.is_none()
                    && imap_port.is_none()
                {
                    bail!("nothing to set; pass at least one of --username, --password, --imap-server, --imap-port");
                }
                // Read-modify-write: the record is always saved wholesale
                let mut settings = store.load()?;
                apply_updates(&mut settings, username, password, imap_server, imap_port);
                store.save(&settings)?;
                println!("Saved {}", store.path().display());
            }
        },
    }

    Ok(())
}

fn apply_updates(
    settings: &mut Settings,
    username: Option<String>,
    password: Option<String>,
    imap_server: Option<String>,
    imap_port: Option<String>,
) {
    if let Some(username) = username {
        settings.username = username;
    }
    if let Some(password) = password {
        settings.password = password;
    }
    if let Some(imap_server) = imap_server {
        settings.imap_server = imap_server;
    }
    if let Some(imap_port) = imap_port {
        settings.imap_port = imap_port;
    }
}

fn run_scan(
    store: &SettingsStore,
    transport: Transport,
    folder: &str,
    json: bool,
    filter: &DisplayFilter,
) -> Result<()> {
    info!(folder, "starting scan");

    let report = match scan(store, transport, folder) {
        Ok(report) => report,
        Err(Error::MissingCredentials) => {
            bail!(
                "credentials incomplete in {}; run: mashscan settings set --username ... --password ... --imap-server ... --imap-port ...",
                store.path().display()
            );
        }
        Err(error @ Error::Connect { .. }) => {
            bail!("{error}; the mailbox was not scanned (this is not an empty mailbox)");
        }
        Err(error) => return Err(error).context("scanning mailbox"),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let cards = output::prepare_cards(&report.cards, filter);
    let neos = output::prepare_neos(&report.neos, filter);

    println!(
        "Scanned {} message(s) in {} ({} unmatched)\n",
        report.messages_seen, folder, report.unmatched
    );
    output::print_card_table(&cards);
    println!();
    output::print_neo_table(&neos);

    if !filter.is_empty() {
        let hidden = (report.cards.len() - cards.len()) + (report.neos.len() - neos.len());
        println!("\nFilters hid {hidden} transaction(s)");
    }

    Ok(())
}

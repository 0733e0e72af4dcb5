//! File-backed connection settings.
//!
//! The on-disk shape is a JSON object with exactly four string keys —
//! `username`, `password`, `imap_server`, `imap_port` — the port included as
//! a string. The file location is injected at construction; there is no
//! process-wide settings path.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The persisted connection record. All fields are strings, including the
/// port; nothing is validated at rest.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Settings {
    pub username: String,
    pub password: String,
    pub imap_server: String,
    pub imap_port: String,
}

impl Settings {
    /// True iff all four fields are non-empty. A scan must not be attempted
    /// otherwise.
    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty()
            && !self.password.is_empty()
            && !self.imap_server.is_empty()
            && !self.imap_port.is_empty()
    }
}

/// Reads and writes the settings record at one injected path.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the conventional location, `$HOME/.mashscan/settings.json`.
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(default_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Return the persisted record. If no file exists yet, write the
    /// all-empty default first and return that.
    pub fn load(&self) -> Result<Settings> {
        if !self.path.exists() {
            let defaults = Settings::default();
            self.save(&defaults)?;
            return Ok(defaults);
        }
        let raw = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Replace the whole record. No partial-field updates.
    pub fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

fn default_path() -> Result<PathBuf> {
    let home = std::env::var("HOME").map_err(|_| {
        Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "HOME is not set",
        ))
    })?;
    Ok(PathBuf::from(home).join(".mashscan").join("settings.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> SettingsStore {
        SettingsStore::new(dir.path().join("settings.json"))
    }

    #[test]
    fn test_load_creates_empty_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let settings = store.load().unwrap();
        assert_eq!(settings, Settings::default());
        assert!(store.path().exists());

        // The created file carries exactly the four expected keys
        let raw = std::fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 4);
        for key in ["username", "password", "imap_server", "imap_port"] {
            assert_eq!(object[key], "", "expected empty default for {key}");
        }
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let settings = Settings {
            username: "user@example.com".to_string(),
            password: "hunter2".to_string(),
            imap_server: "127.0.0.1".to_string(),
            imap_port: "1143".to_string(),
        };
        store.save(&settings).unwrap();
        assert_eq!(store.load().unwrap(), settings);
    }

    #[test]
    fn test_save_replaces_wholesale() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store
            .save(&Settings {
                username: "old".to_string(),
                password: "old".to_string(),
                imap_server: "old".to_string(),
                imap_port: "993".to_string(),
            })
            .unwrap();
        store
            .save(&Settings {
                username: "new".to_string(),
                ..Settings::default()
            })
            .unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.username, "new");
        assert_eq!(loaded.password, "");
        assert_eq!(loaded.imap_port, "");
    }

    #[test]
    fn test_has_credentials_requires_every_field() {
        let full = Settings {
            username: "u".to_string(),
            password: "p".to_string(),
            imap_server: "s".to_string(),
            imap_port: "143".to_string(),
        };
        assert!(full.has_credentials());

        for blank in ["username", "password", "imap_server", "imap_port"] {
            let mut partial = full.clone();
            match blank {
                "username" => partial.username.clear(),
                "password" => partial.password.clear(),
                "imap_server" => partial.imap_server.clear(),
                _ => partial.imap_port.clear(),
            }
            assert!(!partial.has_credentials(), "expected false with empty {blank}");
        }
    }

    #[test]
    fn test_non_numeric_port_is_accepted_at_rest() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let settings = Settings {
            username: "u".to_string(),
            password: "p".to_string(),
            imap_server: "s".to_string(),
            imap_port: "not-a-port".to_string(),
        };
        store.save(&settings).unwrap();
        assert_eq!(store.load().unwrap().imap_port, "not-a-port");
    }

    #[test]
    fn test_corrupt_file_fails_fast() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "not json").unwrap();
        assert!(matches!(store.load(), Err(Error::Serde(_))));
    }
}

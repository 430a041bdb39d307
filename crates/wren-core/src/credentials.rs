//! Credential storage and retrieval.
//!
//! The bearer token lives in a single slot: `${WREN_HOME}/credentials.json`,
//! written with restricted permissions (0600). Absence of the file (or of
//! the token field) means there is no credential — a Guest session.
//!
//! All reads and writes of the credential go through [`CredentialStore`];
//! nothing else touches the file.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::paths;

/// An opaque bearer token identifying a user session to the server.
///
/// The token is never logged or displayed in full.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// A short prefix for log/display purposes.
    pub fn redacted(&self) -> String {
        let prefix: String = self.0.chars().take(8).collect();
        format!("{prefix}…")
    }
}

/// The on-disk credential slot.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct CredentialStore {
    /// The stored bearer token, if logged in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<BearerToken>,
}

impl CredentialStore {
    /// Returns the path to the credentials file.
    pub fn store_path() -> PathBuf {
        paths::credentials_path()
    }

    /// Loads the credential slot from disk.
    /// Returns an empty slot if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::store_path())
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read credentials from {}", path.display()))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse credentials from {}", path.display()))
    }

    /// Saves the credential slot to disk with restricted permissions (0600).
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::store_path())
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents =
            serde_json::to_string_pretty(self).context("Failed to serialize credentials")?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(path)
                .with_context(|| format!("Failed to open {} for writing", path.display()))?;
            file.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", path.display()))?;
        }

        #[cfg(not(unix))]
        {
            fs::write(path, contents)
                .with_context(|| format!("Failed to write to {}", path.display()))?;
        }

        Ok(())
    }

    pub fn token(&self) -> Option<&BearerToken> {
        self.token.as_ref()
    }

    /// Stores a new token (login).
    pub fn set(&mut self, token: BearerToken) {
        self.token = Some(token);
    }

    /// Clears the slot (logout / account deletion). Returns the old token.
    pub fn clear(&mut self) -> Option<BearerToken> {
        self.token.take()
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_load_missing_file_is_empty_slot() {
        let dir = tempdir().unwrap();
        let store = CredentialStore::load_from(&dir.path().join("credentials.json")).unwrap();
        assert!(store.token().is_none());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("credentials.json");

        let mut store = CredentialStore::default();
        store.set(BearerToken::new("tok-12345"));
        store.save_to(&path).unwrap();

        let loaded = CredentialStore::load_from(&path).unwrap();
        assert_eq!(loaded.token().map(BearerToken::as_str), Some("tok-12345"));
    }

    #[test]
    fn test_clear_empties_the_slot_on_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("credentials.json");

        let mut store = CredentialStore::default();
        store.set(BearerToken::new("tok-12345"));
        store.save_to(&path).unwrap();

        store.clear();
        store.save_to(&path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(!contents.contains("tok-12345"));

        let loaded = CredentialStore::load_from(&path).unwrap();
        assert!(loaded.token().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_save_restricts_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("credentials.json");

        let mut store = CredentialStore::default();
        store.set(BearerToken::new("tok"));
        store.save_to(&path).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_redacted_never_shows_full_token() {
        let token = BearerToken::new("a-very-long-secret-token");
        let redacted = token.redacted();
        assert!(!redacted.contains("secret"));
        assert!(redacted.starts_with("a-very-l"));
    }
}

//! CLI command handlers.

pub mod account;
pub mod auth;
pub mod config;
pub mod posts;

use anyhow::Result;
use wren_core::api::ApiClient;
use wren_core::config::Config;
use wren_core::credentials::CredentialStore;

/// Builds an API client carrying the stored credential, if any.
pub(crate) fn client(config: &Config) -> Result<ApiClient> {
    let store = CredentialStore::load()?;
    Ok(ApiClient::with_token(
        config.effective_base_url(),
        store.token().cloned(),
    ))
}

/// Reads a password from stdin when not given on the command line.
pub(crate) fn read_password(given: Option<&str>) -> Result<String> {
    if let Some(password) = given {
        return Ok(password.to_string());
    }
    eprint!("Password: ");
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        anyhow::bail!("password must not be empty");
    }
    Ok(password)
}

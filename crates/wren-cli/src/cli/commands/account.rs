//! Account deletion.

use std::io::Write;

use anyhow::{Context, Result};
use wren_core::config::Config;
use wren_core::credentials::CredentialStore;
use wren_core::session;

use super::client;

pub async fn delete(config: &Config, yes: bool) -> Result<()> {
    let api = client(config)?;
    let resolved = session::resolve_session_strict(&api)
        .await
        .context("resolve session")?;
    let Some(username) = resolved.username else {
        anyhow::bail!("not logged in; nothing to delete");
    };

    if !yes && !confirm(&username)? {
        println!("Aborted.");
        return Ok(());
    }

    api.delete_account().await.context("delete account")?;

    let mut store = CredentialStore::load().unwrap_or_default();
    store.clear();
    store.save().context("clear credential")?;

    println!("Account {username} deleted.");
    Ok(())
}

fn confirm(username: &str) -> Result<bool> {
    eprint!("Permanently delete account {username}? [y/N] ");
    std::io::stderr().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes"))
}

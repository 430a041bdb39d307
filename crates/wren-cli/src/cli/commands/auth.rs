//! Auth command handlers: login, logout, register, whoami.

use anyhow::{Context, Result};
use wren_core::config::Config;
use wren_core::credentials::CredentialStore;
use wren_core::session;

use super::{client, read_password};

pub async fn login(config: &Config, username: &str, password: Option<&str>) -> Result<()> {
    let password = read_password(password)?;
    let api = client(config)?;
    let token = api
        .login(username, &password)
        .await
        .context("login failed")?;

    let mut store = CredentialStore::load().unwrap_or_default();
    store.set(token);
    store.save().context("store credential")?;

    println!("Logged in as {username}.");
    Ok(())
}

pub fn logout() -> Result<()> {
    let mut store = CredentialStore::load().unwrap_or_default();
    if store.clear().is_none() {
        println!("No stored credential.");
        return Ok(());
    }
    store.save().context("clear credential")?;
    println!("Logged out.");
    Ok(())
}

pub async fn register(
    config: &Config,
    username: &str,
    email: &str,
    password: Option<&str>,
) -> Result<()> {
    let password = read_password(password)?;
    let api = client(config)?;
    let message = api
        .register(username, email, &password)
        .await
        .context("registration failed")?;
    println!("{message}");
    println!("Now log in with: wren login {username}");
    Ok(())
}

pub async fn whoami(config: &Config) -> Result<()> {
    let api = client(config)?;
    let session = session::resolve_session_strict(&api)
        .await
        .context("resolve session")?;
    match session.username {
        Some(username) => println!("{username} (role: {})", session.role),
        None => println!("Not logged in (guest)."),
    }
    Ok(())
}

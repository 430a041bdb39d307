//! Full-screen terminal client for a Y microblog server.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stderr};

use anyhow::Result;
pub use runtime::TuiRuntime;
use wren_core::config::Config;
use wren_core::credentials::CredentialStore;

/// Runs the interactive client.
///
/// # Errors
/// Returns an error if no terminal is attached or terminal setup fails.
pub async fn run(config: &Config) -> Result<()> {
    // The interactive client requires a terminal to render
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The interactive client requires a terminal.\n\
             Use `wren posts` or `wren post` for non-interactive use."
        );
    }

    let token = CredentialStore::load().unwrap_or_default().token().cloned();

    let mut runtime = TuiRuntime::new(config.clone(), token)?;
    runtime.run()?;

    Ok(())
}

//! Core wren library (config, credentials, API client, session, gating).

pub mod api;
pub mod config;
pub mod credentials;
pub mod draft;
pub mod error;
pub mod gate;
pub mod logging;
pub mod session;

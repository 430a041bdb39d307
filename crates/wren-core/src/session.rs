//! Session resolution: turning a stored bearer token into an identity.
//!
//! The server's protected endpoint answers with a human-readable identity
//! line of the form:
//!
//! ```text
//! You have logged in, <username>, Role: <role>
//! ```
//!
//! Resolution never fails: any missing token, rejected token, network
//! failure, or malformed identity line yields the Guest session. The
//! distinction the rest of the client cares about is carried in
//! [`Session::role`].

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::error::ApiError;

/// The privilege level attached to a session.
///
/// Roles form a strict ladder: every capability available at a given role
/// is available at all higher roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    Guest,
    User,
    Moderator,
    Admin,
}

impl Role {
    /// Parses a role name as the server spells it. Unknown names map to
    /// Guest rather than failing, so a server-side role we don't know
    /// about degrades to the least privilege.
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "User" => Self::User,
            "Moderator" => Self::Moderator,
            "Admin" => Self::Admin,
            other => {
                if !other.is_empty() && other != "Guest" {
                    warn!(role = other, "unknown role name, treating as Guest");
                }
                Self::Guest
            }
        }
    }

    /// True for any session backed by an accepted credential.
    pub fn is_authenticated(self) -> bool {
        self != Self::Guest
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Guest => "Guest",
            Self::User => "User",
            Self::Moderator => "Moderator",
            Self::Admin => "Admin",
        };
        f.write_str(name)
    }
}

/// A resolved identity: who the server says we are right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub username: Option<String>,
    pub role: Role,
}

impl Session {
    pub fn guest() -> Self {
        Self {
            username: None,
            role: Role::Guest,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.role.is_authenticated()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::guest()
    }
}

/// Parses the identity line returned by the protected endpoint.
///
/// Returns `None` when the line doesn't carry both a username and a
/// `Role:` field in the expected positions.
pub fn parse_identity_message(message: &str) -> Option<Session> {
    let mut parts = message.split(", ");
    parts.next()?; // greeting
    let username = parts.next()?.trim();
    let role_part = parts.next()?.trim();

    if username.is_empty() {
        return None;
    }
    let role_name = role_part.strip_prefix("Role: ")?;

    // An unrecognized role name is a resolution failure, not a partial
    // session. Guest carries no username.
    let role = Role::parse(role_name);
    if role == Role::Guest {
        return None;
    }

    Some(Session {
        username: Some(username.to_string()),
        role,
    })
}

/// Resolves the current session against the server.
///
/// This is the single source of truth for "who am I": a missing token,
/// a 401/403, a network failure, or an unparseable identity line all
/// collapse to Guest. Only genuine server acceptance produces an
/// authenticated session.
pub async fn resolve_session(client: &ApiClient) -> Session {
    let Some(token) = client.token() else {
        debug!("no stored credential, session is Guest");
        return Session::guest();
    };

    match client.get_protected().await {
        Ok(message) => match parse_identity_message(&message) {
            Some(session) => {
                debug!(
                    username = session.username.as_deref().unwrap_or(""),
                    role = %session.role,
                    "session resolved"
                );
                session
            }
            None => {
                warn!(
                    token = %token.redacted(),
                    "server accepted token but identity line was malformed"
                );
                Session::guest()
            }
        },
        Err(err) => {
            if err.is_unauthorized() {
                debug!(token = %token.redacted(), "stored token rejected, session is Guest");
            } else {
                warn!(error = %err, "session resolution failed, falling back to Guest");
            }
            Session::guest()
        }
    }
}

/// Like [`resolve_session`] but surfaces the underlying error so callers
/// that want to distinguish "token rejected" from "server unreachable"
/// (the CLI does) can.
pub async fn resolve_session_strict(client: &ApiClient) -> Result<Session, ApiError> {
    if client.token().is_none() {
        return Ok(Session::guest());
    }
    let message = client.get_protected().await?;
    Ok(parse_identity_message(&message).unwrap_or_else(Session::guest))
}

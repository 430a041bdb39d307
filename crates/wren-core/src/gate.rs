//! Capability gating: which destinations and actions a session gets.
//!
//! Everything here is a pure function of [`Session`]. The capability
//! table is monotonic in role order: anything a role can see or do, every
//! higher role can too.

use std::fmt;

use crate::error::AuthorizationError;
use crate::session::{Role, Session};

/// A navigable surface of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Destination {
    Home,
    Notifications,
    Profile,
    Settings,
    AdminStats,
    AdminInfo,
}

impl Destination {
    /// The minimum role that may view this destination.
    fn required_role(self) -> Role {
        match self {
            Self::Home | Self::Notifications | Self::Profile | Self::Settings => Role::Guest,
            Self::AdminStats | Self::AdminInfo => Role::Admin,
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Home => "Home",
            Self::Notifications => "Notifications",
            Self::Profile => "Profile",
            Self::Settings => "Settings",
            Self::AdminStats => "Admin Stats",
            Self::AdminInfo => "Admin Info",
        };
        f.write_str(name)
    }
}

const ALL_DESTINATIONS: [Destination; 6] = [
    Destination::Home,
    Destination::Notifications,
    Destination::Profile,
    Destination::Settings,
    Destination::AdminStats,
    Destination::AdminInfo,
];

/// The destinations the session's sidebar should offer, in display order.
pub fn visible_destinations(session: &Session) -> Vec<Destination> {
    ALL_DESTINATIONS
        .into_iter()
        .filter(|dest| can_access(session, *dest))
        .collect()
}

/// Whether the session may view the destination. Mirrors
/// [`visible_destinations`] exactly; a destination reached some other way
/// (stale selection after a role change) renders a denied state instead
/// of its content.
pub fn can_access(session: &Session, destination: Destination) -> bool {
    session.role >= destination.required_role()
}

/// Whether the session may create posts. Any authenticated role.
pub fn check_create(session: &Session) -> Result<(), AuthorizationError> {
    if session.is_authenticated() {
        Ok(())
    } else {
        Err(AuthorizationError::NotAuthenticated)
    }
}

/// Whether the session may delete posts. Moderators and admins only;
/// the check runs before any network call, so a disallowed delete never
/// reaches the server.
pub fn check_delete(session: &Session) -> Result<(), AuthorizationError> {
    match session.role {
        Role::Guest => Err(AuthorizationError::NotAuthenticated),
        Role::User => Err(AuthorizationError::InsufficientRole),
        Role::Moderator | Role::Admin => Ok(()),
    }
}

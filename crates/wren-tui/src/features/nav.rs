//! Sidebar navigation over gated destinations.
//!
//! The visible destination list is a pure function of the session
//! (`wren_core::gate`), recomputed whenever the session changes. The
//! selection survives re-resolution when still accessible and falls back
//! to Home when it isn't (a role downgrade while an admin view is open).

use wren_core::gate::{self, Destination};
use wren_core::session::Session;

#[derive(Debug, Clone)]
pub struct NavState {
    pub selected: Destination,
}

impl NavState {
    pub fn new() -> Self {
        Self {
            selected: Destination::Home,
        }
    }

    /// Moves the selection forward through the session's visible list.
    pub fn select_next(&mut self, session: &Session) {
        self.step(session, 1);
    }

    /// Moves the selection backward through the session's visible list.
    pub fn select_prev(&mut self, session: &Session) {
        self.step(session, -1);
    }

    fn step(&mut self, session: &Session, direction: isize) {
        let visible = gate::visible_destinations(session);
        if visible.is_empty() {
            return;
        }
        let current = visible
            .iter()
            .position(|d| *d == self.selected)
            .unwrap_or(0);
        let len = visible.len() as isize;
        let next = (current as isize + direction).rem_euclid(len) as usize;
        self.selected = visible[next];
    }

    /// Called after session re-resolution: a destination the new role
    /// cannot access falls back to Home.
    pub fn on_session_changed(&mut self, session: &Session) {
        if !gate::can_access(session, self.selected) {
            self.selected = Destination::Home;
        }
    }
}

impl Default for NavState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use wren_core::session::Role;

    use super::*;

    fn session(role: Role) -> Session {
        Session {
            username: (role != Role::Guest).then(|| "alice".to_string()),
            role,
        }
    }

    #[test]
    fn test_selection_cycles_through_visible_destinations() {
        let s = session(Role::User);
        let mut nav = NavState::new();
        let visible = gate::visible_destinations(&s);
        for expected in visible.iter().skip(1).chain(visible.first()) {
            nav.select_next(&s);
            assert_eq!(nav.selected, *expected);
        }
    }

    #[test]
    fn test_backward_wraps_to_last() {
        let s = session(Role::Guest);
        let mut nav = NavState::new();
        nav.select_prev(&s);
        assert_eq!(nav.selected, Destination::Settings);
    }

    #[test]
    fn test_admin_cycle_reaches_admin_destinations() {
        let s = session(Role::Admin);
        let mut nav = NavState::new();
        let mut seen = Vec::new();
        for _ in 0..6 {
            seen.push(nav.selected);
            nav.select_next(&s);
        }
        assert!(seen.contains(&Destination::AdminStats));
        assert!(seen.contains(&Destination::AdminInfo));
    }

    #[test]
    fn test_role_downgrade_falls_back_to_home() {
        let mut nav = NavState::new();
        nav.selected = Destination::AdminStats;
        nav.on_session_changed(&session(Role::User));
        assert_eq!(nav.selected, Destination::Home);
    }

    #[test]
    fn test_accessible_selection_survives_session_change() {
        let mut nav = NavState::new();
        nav.selected = Destination::Profile;
        nav.on_session_changed(&session(Role::Guest));
        assert_eq!(nav.selected, Destination::Profile);
    }
}

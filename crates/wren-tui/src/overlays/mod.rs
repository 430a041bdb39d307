//! Modal overlays.
//!
//! Overlays temporarily take over keyboard input. Each is self-contained:
//! it owns its state, key handler, and render function. The reducer
//! routes key events here first when an overlay is open and applies the
//! returned transition.

pub mod confirm;
pub mod signin;

pub use confirm::{ConfirmAction, ConfirmState};
use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Clear};
pub use signin::{SignInMode, SignInState};

use crate::effects::UiEffect;
use crate::state::TuiState;

/// Transition returned by overlay key handlers.
#[derive(Debug)]
pub enum OverlayTransition {
    Stay,
    Close,
}

/// Update returned by overlay key handlers.
#[derive(Debug)]
pub struct OverlayUpdate {
    pub transition: OverlayTransition,
    pub effects: Vec<UiEffect>,
}

impl OverlayUpdate {
    pub fn stay() -> Self {
        Self {
            transition: OverlayTransition::Stay,
            effects: Vec::new(),
        }
    }

    pub fn close() -> Self {
        Self {
            transition: OverlayTransition::Close,
            effects: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_effects(mut self, effects: Vec<UiEffect>) -> Self {
        self.effects = effects;
        self
    }
}

#[derive(Debug)]
pub enum Overlay {
    SignIn(SignInState),
    Confirm(ConfirmState),
}

impl Overlay {
    pub fn handle_key(&mut self, tui: &mut TuiState, key: KeyEvent) -> OverlayUpdate {
        match self {
            Overlay::SignIn(s) => s.handle_key(tui, key),
            Overlay::Confirm(c) => c.handle_key(tui, key),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        match self {
            Overlay::SignIn(s) => s.render(frame, area),
            Overlay::Confirm(c) => c.render(frame, area),
        }
    }
}

/// Computes a centered popup rect clamped to the available area.
pub(crate) fn centered_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Clears the popup area and draws the bordered container, returning the
/// inner content rect.
pub(crate) fn render_container(frame: &mut Frame, popup: Rect, title: &str) -> Rect {
    frame.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title.to_string())
        .border_style(Style::default().fg(Color::Cyan));
    let inner = Rect::new(
        popup.x + 2,
        popup.y + 1,
        popup.width.saturating_sub(4),
        popup.height.saturating_sub(2),
    );
    frame.render_widget(block, popup);
    inner
}

//! Application state composition.
//!
//! `AppState` combines `TuiState` (everything except overlays) with
//! `Option<Overlay>`. The split lets overlay handlers take `&mut self`
//! and `&mut TuiState` at the same time without borrow conflicts. All
//! mutation happens in the reducer; the runtime only reads state to
//! render and to execute effects.

use std::cell::Cell;

use wren_core::config::Config;
use wren_core::session::Session;

use crate::common::{TaskSeq, Tasks};
use crate::features::feed::FeedState;
use crate::features::layout::{LayoutState, ResizeBounds};
use crate::features::nav::NavState;
use crate::overlays::Overlay;

/// Combined application state for the TUI.
pub struct AppState {
    pub tui: TuiState,
    pub overlay: Option<Overlay>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            tui: TuiState::new(config),
            overlay: None,
        }
    }
}

/// A transient status message shown at the bottom of the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub level: NoticeLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: NoticeLevel::Info,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: NoticeLevel::Error,
        }
    }
}

/// TUI application state (non-overlay).
pub struct TuiState {
    /// Flag indicating the app should quit.
    pub should_quit: bool,
    /// Loaded configuration.
    pub config: Config,
    /// The last resolved session. Guest until resolution completes.
    pub session: Session,
    /// Feed posts and draft.
    pub feed: FeedState,
    /// Sidebar navigation.
    pub nav: NavState,
    /// Side-pane width and drag state.
    pub layout: LayoutState,
    /// Task id sequence for async operations.
    pub task_seq: TaskSeq,
    /// Task lifecycle state for async operations.
    pub tasks: Tasks,
    /// Transient status message.
    pub notice: Option<Notice>,
    /// Divider column, set during render and read for mouse hit tests.
    pub divider_x: Cell<Option<u16>>,
}

impl TuiState {
    pub fn new(config: Config) -> Self {
        let pane_width = config.side_pane_width.unwrap_or(40);
        Self {
            should_quit: false,
            config,
            session: Session::guest(),
            feed: FeedState::default(),
            nav: NavState::new(),
            layout: LayoutState::new(pane_width, ResizeBounds::default()),
            task_seq: TaskSeq::default(),
            tasks: Tasks::default(),
            notice: None,
            divider_x: Cell::new(None),
        }
    }
}

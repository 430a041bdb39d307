//! UI event types.
//!
//! Events are inputs to the reducer: terminal input, tick cadence, and
//! the results of async operations arriving through the inbox channel.
//! Async results are wrapped in `TaskCompleted` so the reducer can drop
//! stale completions before applying them.

use crossterm::event::Event;
use wren_core::api::types::Post;
use wren_core::credentials::BearerToken;
use wren_core::error::ApiError;
use wren_core::session::Session;

use crate::common::{TaskCompleted, TaskKind, TaskStarted};

#[derive(Debug)]
pub enum UiEvent {
    /// Periodic tick; drives rendering cadence.
    Tick,
    /// Current terminal dimensions, prepended each loop iteration.
    Frame { width: u16, height: u16 },
    /// Raw terminal input.
    Terminal(Event),

    /// An async task was spawned; records the active id for its kind.
    TaskStarted { kind: TaskKind, started: TaskStarted },
    /// An async task finished. The inner event is applied only if the
    /// task is still the active one for its kind.
    TaskCompleted {
        kind: TaskKind,
        completed: TaskCompleted<Box<UiEvent>>,
    },

    /// Session resolution finished (infallible; failure means Guest).
    SessionResolved { session: Session },
    /// Feed load finished.
    FeedLoaded { result: Result<Vec<Post>, ApiError> },
    /// A feed load was cancelled before completing; carries nothing.
    FeedLoadAborted,
    /// Post creation finished.
    PostCreated { result: Result<(), ApiError> },
    /// Post deletion finished.
    PostDeleted { result: Result<(), ApiError> },
    /// Login exchange finished.
    LoginCompleted {
        result: Result<BearerToken, ApiError>,
    },
    /// Registration finished; `Ok` carries the server's message.
    RegisterCompleted { result: Result<String, ApiError> },
    /// Account deletion finished.
    AccountDeleted { result: Result<(), ApiError> },
}

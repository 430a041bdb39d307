//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime
//! executes. They represent I/O and task spawning only; the reducer
//! itself never performs I/O or spawns tasks.

use tokio_util::sync::CancellationToken;
use wren_core::credentials::BearerToken;

use crate::common::{TaskId, TaskKind};

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Re-resolve the session from the stored credential.
    ResolveSession { task: TaskId },

    /// Fetch the feed. Cancellable; navigating away cancels it.
    LoadFeed { task: TaskId },

    /// Submit a validated draft.
    CreatePost {
        task: TaskId,
        message: String,
        hashtags: Vec<String>,
    },

    /// Delete a post by id.
    DeletePost { task: TaskId, id: u64 },

    /// Exchange username/password for a bearer token.
    Login {
        task: TaskId,
        username: String,
        password: String,
    },

    /// Create a new account.
    Register {
        task: TaskId,
        username: String,
        email: String,
        password: String,
    },

    /// Delete the authenticated account.
    DeleteAccount { task: TaskId },

    /// Persist a bearer token to the credential slot.
    SaveCredential { token: BearerToken },

    /// Empty the credential slot (logout / account deletion).
    ClearCredential,

    /// Cancel an in-progress task. The runtime calls `cancel()` on the
    /// token; the reducer has already cleared the task's active id, so
    /// any completion that still arrives is dropped as stale.
    CancelTask {
        kind: TaskKind,
        token: Option<CancellationToken>,
    },
}

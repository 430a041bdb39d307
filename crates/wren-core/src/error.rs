//! Error types shared across the client.

use thiserror::Error;

/// A failure talking to the Y server.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server rejected the request's credentials (401/403).
    /// The stored token, if any, is invalid or expired.
    #[error("not authorized (status {status})")]
    Unauthorized { status: u16 },

    /// The server answered with an unexpected status.
    #[error("server returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// The request never completed (connection refused, timeout, DNS).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body could not be decoded as the expected shape.
    #[error("malformed response: {0}")]
    Decode(#[source] serde_json::Error),
}

impl ApiError {
    /// True when the failure means the current credential is no good and
    /// the session should be re-resolved as Guest.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

/// A draft post failed local validation. Checks run in a fixed order and
/// the first failure is reported.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("post message cannot be empty")]
    EmptyMessage,

    #[error("post message is too long ({len} characters, max {max})")]
    MessageTooLong { len: usize, max: usize },

    #[error("too many hashtags ({count}, max {max})")]
    TooManyHashtags { count: usize, max: usize },

    #[error("hashtag '{tag}' is too long ({len} characters, max {max})")]
    HashtagTooLong { tag: String, len: usize, max: usize },
}

/// An action was attempted that the current session cannot perform.
/// Checked locally, before any network call is made.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationError {
    /// The action requires being signed in and the session is Guest.
    #[error("sign in to do that")]
    NotAuthenticated,

    /// Signed in, but the role is below what the action requires.
    #[error("your role does not allow that")]
    InsufficientRole,
}

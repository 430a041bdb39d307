//! Draft post composition and validation.
//!
//! A [`Draft`] is purely local state: the message being typed, the
//! hashtags staged so far, and the hashtag input buffer. Nothing here
//! touches the network; validation runs before submission and hashtag
//! staging runs as the user confirms each tag.

use crate::error::ValidationError;

/// Maximum post message length, in characters.
pub const MAX_MESSAGE_LEN: usize = 500;
/// Maximum number of hashtags per post.
pub const MAX_HASHTAGS: usize = 5;
/// Maximum length of a single hashtag, in characters (including '#').
pub const MAX_HASHTAG_LEN: usize = 30;

/// An in-progress post.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Draft {
    pub message: String,
    pub hashtags: Vec<String>,
    /// The hashtag currently being typed, not yet staged.
    pub hashtag_input: String,
}

impl Draft {
    pub fn is_empty(&self) -> bool {
        self.message.is_empty() && self.hashtags.is_empty() && self.hashtag_input.is_empty()
    }

    /// Validates the draft for submission. Checks run in a fixed order
    /// and the first failure wins: an empty message is reported as empty
    /// even if other limits are also exceeded.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.message.trim().is_empty() {
            return Err(ValidationError::EmptyMessage);
        }
        let len = self.message.chars().count();
        if len > MAX_MESSAGE_LEN {
            return Err(ValidationError::MessageTooLong {
                len,
                max: MAX_MESSAGE_LEN,
            });
        }
        Ok(())
    }

    /// Stages the current hashtag input onto the draft.
    ///
    /// The candidate is trimmed and normalized to carry exactly one
    /// leading '#'. On success the input buffer is cleared; on rejection
    /// both the staged list and the buffer are left untouched.
    pub fn stage_hashtag(&mut self) -> Result<(), ValidationError> {
        let candidate = self.hashtag_input.trim();
        if candidate.is_empty() || candidate == "#" {
            // Nothing to stage; silently drop.
            self.hashtag_input.clear();
            return Ok(());
        }

        if self.hashtags.len() >= MAX_HASHTAGS {
            return Err(ValidationError::TooManyHashtags {
                count: self.hashtags.len(),
                max: MAX_HASHTAGS,
            });
        }

        let normalized = normalize_hashtag(candidate);
        let len = normalized.chars().count();
        if len > MAX_HASHTAG_LEN {
            return Err(ValidationError::HashtagTooLong {
                tag: normalized,
                len,
                max: MAX_HASHTAG_LEN,
            });
        }

        self.hashtags.push(normalized);
        self.hashtag_input.clear();
        Ok(())
    }

    /// Resets the draft to empty (submit success or explicit cancel).
    pub fn clear(&mut self) {
        self.message.clear();
        self.hashtags.clear();
        self.hashtag_input.clear();
    }
}

/// Ensures a single leading '#'. Idempotent: `"#rust"` stays `"#rust"`.
fn normalize_hashtag(tag: &str) -> String {
    if let Some(rest) = tag.strip_prefix('#') {
        format!("#{rest}")
    } else {
        format!("#{tag}")
    }
}

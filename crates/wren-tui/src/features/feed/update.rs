//! Feed feature reducer pieces.
//!
//! Pure decisions about drafting, submission, and deletion. The main
//! reducer maps the outcomes onto effects and overlays; nothing here
//! performs I/O.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use wren_core::draft::Draft;
use wren_core::error::{AuthorizationError, ValidationError};
use wren_core::gate;
use wren_core::session::Session;

use super::state::{ComposerFocus, FeedState};

/// What a submit attempt resolved to.
#[derive(Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Draft is valid and the session may post; carries the payload.
    Submit {
        message: String,
        hashtags: Vec<String>,
    },
    /// Guest session; the UI should present the sign-in prompt. The
    /// draft is left intact.
    NeedsSignIn,
    /// Local validation failed; nothing leaves the client.
    Invalid(ValidationError),
}

/// Checks permission then validation, in that order. The draft is never
/// cleared here; it survives until the server confirms the create.
pub fn submit_draft(session: &Session, draft: &Draft) -> SubmitOutcome {
    if gate::check_create(session).is_err() {
        return SubmitOutcome::NeedsSignIn;
    }
    if let Err(err) = draft.validate() {
        return SubmitOutcome::Invalid(err);
    }
    SubmitOutcome::Submit {
        message: draft.message.trim().to_string(),
        hashtags: draft.hashtags.clone(),
    }
}

/// What a delete attempt resolved to.
#[derive(Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Permitted; the UI should ask for confirmation before issuing it.
    Confirm { id: u64 },
    /// The session's role does not allow deletion.
    Denied(AuthorizationError),
    /// No post selected.
    Nothing,
}

/// `filter` is the active author filter (the Profile view); a selection
/// resting on a post that filter hides is not deletable from this view.
pub fn request_delete(session: &Session, feed: &FeedState, filter: Option<&str>) -> DeleteOutcome {
    let Some(post) = feed.selected_post() else {
        return DeleteOutcome::Nothing;
    };
    if filter.is_some_and(|user| post.username != user) {
        return DeleteOutcome::Nothing;
    }
    match gate::check_delete(session) {
        Ok(()) => DeleteOutcome::Confirm { id: post.id },
        Err(err) => DeleteOutcome::Denied(err),
    }
}

/// Routes a key press into the open composer. Returns `Some` when the
/// user asked to submit; `None` for ordinary editing.
pub fn handle_composer_key(feed: &mut FeedState, key: KeyEvent) -> Option<ComposerAction> {
    let focus = feed.composer?;
    match (focus, key.code) {
        (_, KeyCode::Esc) => {
            feed.cancel_composer();
            None
        }
        (_, KeyCode::Tab) => {
            feed.composer = Some(match focus {
                ComposerFocus::Message => ComposerFocus::Hashtag,
                ComposerFocus::Hashtag => ComposerFocus::Message,
            });
            None
        }
        (ComposerFocus::Message, KeyCode::Enter) => Some(ComposerAction::Submit),
        (ComposerFocus::Hashtag, KeyCode::Enter) => Some(ComposerAction::StageHashtag),
        (ComposerFocus::Message, KeyCode::Char(c)) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            feed.draft.message.push(c);
            None
        }
        (ComposerFocus::Hashtag, KeyCode::Char(c)) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            feed.draft.hashtag_input.push(c);
            None
        }
        (ComposerFocus::Message, KeyCode::Backspace) => {
            feed.draft.message.pop();
            None
        }
        (ComposerFocus::Hashtag, KeyCode::Backspace) => {
            if feed.draft.hashtag_input.is_empty() {
                // Backspace on an empty input unstages the last hashtag.
                feed.draft.hashtags.pop();
            } else {
                feed.draft.hashtag_input.pop();
            }
            None
        }
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposerAction {
    Submit,
    StageHashtag,
}

//! Feed feature slice (state / update / render).

pub mod render;
pub mod state;
pub mod update;

pub use state::{ComposerFocus, FeedState};

//! Feed display and composition state.

use wren_core::api::types::Post;
use wren_core::draft::Draft;

/// Which composer field has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposerFocus {
    Message,
    Hashtag,
}

#[derive(Debug, Default, Clone)]
pub struct FeedState {
    /// Server-ordered posts, replaced wholesale on every load.
    pub posts: Vec<Post>,
    /// The in-progress draft. Survives failed submissions.
    pub draft: Draft,
    /// `Some` while the composer is open.
    pub composer: Option<ComposerFocus>,
    /// Index of the selected post within the currently visible list.
    pub selected: usize,
}

impl FeedState {
    /// Replaces the feed with a fresh server snapshot. The selection is
    /// clamped rather than reset so browsing survives background loads.
    pub fn replace_posts(&mut self, posts: Vec<Post>) {
        self.posts = posts;
        self.selected = self.selected.min(self.posts.len().saturating_sub(1));
    }

    /// Posts authored by the given user, for the Profile view.
    pub fn posts_by<'a>(&'a self, username: &str) -> Vec<&'a Post> {
        self.posts
            .iter()
            .filter(|post| post.username == username)
            .collect()
    }

    pub fn selected_post(&self) -> Option<&Post> {
        self.posts.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.posts.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn is_composing(&self) -> bool {
        self.composer.is_some()
    }

    pub fn open_composer(&mut self) {
        self.composer = Some(ComposerFocus::Message);
    }

    /// Closes the composer and discards the draft.
    pub fn cancel_composer(&mut self) {
        self.composer = None;
        self.draft.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: u64, username: &str) -> Post {
        Post {
            id,
            message: format!("post {id}"),
            hashtags: vec![],
            username: username.to_string(),
            timestamp: String::new(),
        }
    }

    #[test]
    fn test_replace_clamps_selection() {
        let mut feed = FeedState::default();
        feed.replace_posts(vec![post(1, "a"), post(2, "a"), post(3, "b")]);
        feed.selected = 2;
        feed.replace_posts(vec![post(1, "a")]);
        assert_eq!(feed.selected, 0);
    }

    #[test]
    fn test_selection_stays_in_range() {
        let mut feed = FeedState::default();
        feed.replace_posts(vec![post(1, "a"), post(2, "a")]);
        feed.select_next();
        feed.select_next();
        assert_eq!(feed.selected, 1);
        feed.select_prev();
        feed.select_prev();
        assert_eq!(feed.selected, 0);
    }

    #[test]
    fn test_posts_by_filters_author() {
        let mut feed = FeedState::default();
        feed.replace_posts(vec![post(1, "alice"), post(2, "bob"), post(3, "alice")]);
        let mine = feed.posts_by("alice");
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|p| p.username == "alice"));
    }

    #[test]
    fn test_cancel_composer_discards_draft() {
        let mut feed = FeedState::default();
        feed.open_composer();
        feed.draft.message.push_str("half-written");
        feed.cancel_composer();
        assert!(!feed.is_composing());
        assert!(feed.draft.is_empty());
    }
}

// Application state and operation outcomes.

use crate::api::models::{Category, CategoryFilter, Post, SessionUser};

/// Everything the client remembers while it runs.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// The logged-in user, if any.
    pub user: Option<SessionUser>,
    /// The post most recently opened.
    pub current_post: Option<i64>,
    /// Category selected for the home listing.
    pub category: CategoryFilter,
}

impl AppState {
    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    /// Forget everything tied to the current user.
    pub fn reset(&mut self) {
        *self = AppState::default();
    }
}

/// Input for creating a post.
#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    pub title: Option<String>,
    pub category: Option<Category>,
    pub content: String,
    pub is_anonymous: bool,
}

/// Posts shown on the home page after category filtering.
#[derive(Debug, Clone)]
pub struct PostListing {
    pub posts: Vec<Post>,
    pub filter: CategoryFilter,
}

/// The logged-in user's own posts and totals.
#[derive(Debug, Clone)]
pub struct DashboardSummary {
    /// The user's posts, each with a populated comment list.
    pub posts: Vec<Post>,
    pub total_posts: usize,
    pub total_comments: usize,
    pub anonymous_posts: usize,
}

/// Result of submitting a comment.
#[derive(Debug, Clone)]
pub enum CommentOutcome {
    /// Nothing to submit after trimming.
    Empty,
    /// Moderation flagged the text; nothing was sent.
    Rejected,
    /// Comment stored; carries the refreshed post.
    Posted(Post),
}

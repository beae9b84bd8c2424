// The App controller — one method per user-facing operation.

use std::sync::Arc;

use anyhow::{Context, Result};
use futures::future::join_all;
use tracing::{debug, info, warn};

use super::state::{AppState, CommentOutcome, DashboardSummary, PostDraft, PostListing};
use crate::api::models::{CategoryFilter, NewComment, NewPost, Post, SessionUser};
use crate::api::traits::ForumBackend;
use crate::moderation::traits::ContentFilter;
use crate::session::SessionStore;

/// Client-side controller holding the backend, moderation policy, session
/// store and explicit application state.
pub struct App {
    backend: Arc<dyn ForumBackend>,
    filter: Box<dyn ContentFilter>,
    session: SessionStore,
    state: AppState,
}

impl App {
    pub fn new(
        backend: Arc<dyn ForumBackend>,
        filter: Box<dyn ContentFilter>,
        session: SessionStore,
    ) -> Self {
        Self {
            backend,
            filter,
            session,
            state: AppState::default(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn current_user(&self) -> Option<&SessionUser> {
        self.state.user.as_ref()
    }

    // --- Auth ---

    /// Restore a stored session into state. Returns whether a user is logged in.
    pub fn check_auth(&mut self) -> bool {
        self.state.user = self.session.load();
        if let Some(user) = &self.state.user {
            debug!(user_id = user.user_id, "Restored session");
        }
        self.state.is_logged_in()
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<&SessionUser> {
        let user = self.backend.login(email.trim(), password).await?;
        info!(user_id = user.user_id, "Logged in");
        self.start_session(user)
    }

    pub async fn signup(&mut self, name: &str, email: &str, password: &str) -> Result<&SessionUser> {
        let user = self
            .backend
            .register(name.trim(), email.trim(), password)
            .await?;
        info!(user_id = user.user_id, "Registered");
        self.start_session(user)
    }

    fn start_session(&mut self, user: SessionUser) -> Result<&SessionUser> {
        self.session.save(&user)?;
        self.state.reset();
        Ok(&*self.state.user.insert(user))
    }

    /// Tear down the session: state is reset and the stored session removed.
    pub fn logout(&mut self) -> Result<()> {
        if let Some(user) = &self.state.user {
            info!(user_id = user.user_id, "Logged out");
        }
        self.state.reset();
        self.session.clear()
    }

    fn require_user(&self) -> Result<&SessionUser> {
        self.state
            .user
            .as_ref()
            .context("Not logged in. Run `carecorner login` first.")
    }

    // --- Browsing ---

    pub fn set_category(&mut self, filter: CategoryFilter) {
        self.state.category = filter;
    }

    /// Fetch all posts and keep those in the selected category.
    pub async fn load_posts(&self) -> Result<PostListing> {
        let filter = self.state.category;
        let posts: Vec<Post> = self
            .backend
            .list_posts()
            .await?
            .into_iter()
            .filter(|p| filter.matches(p))
            .collect();

        debug!(count = posts.len(), category = %filter, "Loaded posts");
        Ok(PostListing { posts, filter })
    }

    /// Open a single post with its comments.
    pub async fn show_post(&mut self, post_id: i64) -> Result<Post> {
        let post = self.backend.get_post(post_id).await?;
        self.state.current_post = Some(post_id);
        Ok(post)
    }

    /// The logged-in user's posts with comment totals.
    ///
    /// The list endpoint only returns comment counts, so posts without a
    /// comment list get their detail fetched concurrently. A failed detail
    /// fetch leaves that post with no comments rather than failing the page.
    pub async fn load_dashboard(&self) -> Result<DashboardSummary> {
        let user_id = self.require_user()?.user_id;

        let mut posts: Vec<Post> = self
            .backend
            .list_posts()
            .await?
            .into_iter()
            .filter(|p| p.author_id == Some(user_id))
            .collect();

        if posts.iter().any(|p| p.comments.is_none()) {
            let details = join_all(posts.iter().map(|p| self.backend.get_post(p.id))).await;
            for (post, detail) in posts.iter_mut().zip(details) {
                match detail {
                    Ok(detail) if detail.comments.is_some() => post.comments = detail.comments,
                    Ok(_) => {}
                    Err(e) => warn!(post_id = post.id, error = %e, "Failed to fetch post detail"),
                }
                post.comments.get_or_insert_with(Vec::new);
            }
        }

        let total_comments = posts
            .iter()
            .map(|p| p.comments.as_ref().map_or(0, Vec::len))
            .sum();
        let anonymous_posts = posts.iter().filter(|p| p.is_anonymous).count();

        Ok(DashboardSummary {
            total_posts: posts.len(),
            total_comments,
            anonymous_posts,
            posts,
        })
    }

    // --- Writing ---

    /// Create a post. Category and content are required; a blank title
    /// becomes "Untitled".
    pub async fn submit_post(&self, draft: PostDraft) -> Result<Post> {
        let user_id = self.require_user()?.user_id;

        let content = draft.content.trim();
        let Some(category) = draft.category.filter(|_| !content.is_empty()) else {
            anyhow::bail!("Please fill in all required fields.");
        };

        let title = draft
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or("Untitled");

        let post = self
            .backend
            .create_post(&NewPost {
                title: title.to_string(),
                category: category.as_str().to_string(),
                content: content.to_string(),
                author_id: user_id,
                is_anonymous: draft.is_anonymous,
            })
            .await?;

        info!(post_id = post.id, category = %category, "Created post");
        Ok(post)
    }

    /// Submit a comment. Flagged text is rejected before any request is sent.
    pub async fn submit_comment(&mut self, post_id: i64, text: &str) -> Result<CommentOutcome> {
        let user_id = self.require_user()?.user_id;

        let content = text.trim();
        if content.is_empty() {
            return Ok(CommentOutcome::Empty);
        }

        if self.filter.is_flagged(content) {
            info!(post_id, "Comment rejected by moderation filter");
            return Ok(CommentOutcome::Rejected);
        }

        let comment = self
            .backend
            .add_comment(
                post_id,
                &NewComment {
                    content: content.to_string(),
                    author_id: user_id,
                },
            )
            .await?;
        debug!(post_id, comment_id = comment.id, "Added comment");

        let refreshed = self.show_post(post_id).await?;
        Ok(CommentOutcome::Posted(refreshed))
    }

    pub async fn delete_post(&mut self, post_id: i64) -> Result<()> {
        self.backend.delete_post(post_id).await?;
        if self.state.current_post == Some(post_id) {
            self.state.current_post = None;
        }
        info!(post_id, "Deleted post");
        Ok(())
    }
}

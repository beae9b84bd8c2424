// Forum backend trait — async interface over the REST API.
//
// Implementors: ForumClient (reqwest). Tests drive the app controller with
// an in-memory implementation instead.

use anyhow::Result;
use async_trait::async_trait;

use super::models::{Comment, NewComment, NewPost, Post, SessionUser};

#[async_trait]
pub trait ForumBackend: Send + Sync {
    // --- Auth ---

    /// Log in with email and password.
    async fn login(&self, email: &str, password: &str) -> Result<SessionUser>;

    /// Create an account and return the new user.
    async fn register(&self, name: &str, email: &str, password: &str) -> Result<SessionUser>;

    // --- Posts ---

    /// All posts, most recent first.
    async fn list_posts(&self) -> Result<Vec<Post>>;

    /// A single post with its full comment list.
    async fn get_post(&self, post_id: i64) -> Result<Post>;

    /// Create a post and return it as stored.
    async fn create_post(&self, post: &NewPost) -> Result<Post>;

    /// Delete a post.
    async fn delete_post(&self, post_id: i64) -> Result<()>;

    // --- Comments ---

    /// Add a comment to a post and return it as stored.
    async fn add_comment(&self, post_id: i64, comment: &NewComment) -> Result<Comment>;
}

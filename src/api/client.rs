// HTTP client for the Care Corner REST backend.
//
// A thin reqwest wrapper: JSON in, JSON out, and the backend's
// `{"success": false, "message": ...}` envelope turned into an error.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

use super::models::{ApiMessage, AuthResponse, Comment, NewComment, NewPost, Post, SessionUser};
use super::traits::ForumBackend;

/// Default backend endpoint for local development.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

const CONNECT_ERROR: &str = "Failed to connect to server. Please try again later.";

/// Client for the forum backend.
pub struct ForumClient {
    client: reqwest::Client,
    base_url: String,
}

impl ForumClient {
    /// Create a new client pointing at the given base URL (including the `/api` prefix).
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("carecorner/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for an endpoint path like `/posts/3`.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, what: &str) -> Result<T> {
        let url = self.url(path);
        debug!(url = %url, "GET");

        let response = self.client.get(&url).send().await.context(CONNECT_ERROR)?;
        let response = ensure_success(response, what).await?;

        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to parse {what} response"))
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
        what: &str,
    ) -> Result<T> {
        let url = self.url(path);
        debug!(url = %url, "POST");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .context(CONNECT_ERROR)?;
        let response = ensure_success(response, what).await?;

        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to parse {what} response"))
    }

    /// Auth endpoints answer failures with a JSON body too, so the body is
    /// read regardless of status.
    async fn auth(&self, path: &str, body: serde_json::Value, fallback: &str) -> Result<SessionUser> {
        let url = self.url(path);
        debug!(url = %url, "POST (auth)");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .context(CONNECT_ERROR)?;

        let status = response.status();
        let parsed: AuthResponse = response
            .json()
            .await
            .with_context(|| format!("Backend returned {status} with an unreadable body"))?;

        parsed.into_user(fallback)
    }
}

#[async_trait]
impl ForumBackend for ForumClient {
    async fn login(&self, email: &str, password: &str) -> Result<SessionUser> {
        self.auth(
            "/login",
            json!({ "email": email, "password": password }),
            "Invalid credentials",
        )
        .await
    }

    async fn register(&self, name: &str, email: &str, password: &str) -> Result<SessionUser> {
        self.auth(
            "/register",
            json!({ "name": name, "email": email, "password": password }),
            "Registration failed",
        )
        .await
    }

    async fn list_posts(&self) -> Result<Vec<Post>> {
        self.get_json("/posts", "posts").await
    }

    async fn get_post(&self, post_id: i64) -> Result<Post> {
        self.get_json(&format!("/posts/{post_id}"), "post detail").await
    }

    async fn create_post(&self, post: &NewPost) -> Result<Post> {
        let body = serde_json::to_value(post).context("Failed to encode post")?;
        self.post_json("/posts", &body, "create post")
            .await
            .context("Failed to create post. Please try again.")
    }

    async fn delete_post(&self, post_id: i64) -> Result<()> {
        let url = self.url(&format!("/posts/{post_id}"));
        debug!(url = %url, "DELETE");

        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .context(CONNECT_ERROR)?;

        if response.status() == StatusCode::NO_CONTENT {
            return Ok(());
        }

        let message = read_message(response).await;
        anyhow::bail!("Failed to delete post: {}", message.as_deref().unwrap_or("Unknown error"))
    }

    async fn add_comment(&self, post_id: i64, comment: &NewComment) -> Result<Comment> {
        let body = serde_json::to_value(comment).context("Failed to encode comment")?;
        self.post_json(&format!("/posts/{post_id}/comments"), &body, "add comment")
            .await
            .context("Failed to add comment. Please try again.")
    }
}

/// Pass successful responses through; turn anything else into an error
/// carrying the backend's message when it sent one.
async fn ensure_success(response: Response, what: &str) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let message = read_message(response).await;
    anyhow::bail!(
        "Backend returned {status} for {what}: {}",
        message.as_deref().unwrap_or("Unknown error")
    )
}

async fn read_message(response: Response) -> Option<String> {
    let body = response.text().await.unwrap_or_default();
    parse_message(&body)
}

/// Extract `message` from an error envelope body.
pub fn parse_message(body: &str) -> Option<String> {
    serde_json::from_str::<ApiMessage>(body)
        .ok()
        .and_then(|m| m.message)
        .filter(|m| !m.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = ForumClient::new("http://localhost:5000/api/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000/api");
        assert_eq!(client.url("/posts/7"), "http://localhost:5000/api/posts/7");
        assert_eq!(client.url("login"), "http://localhost:5000/api/login");
    }

    #[test]
    fn test_parse_message() {
        assert_eq!(
            parse_message(r#"{"success": false, "message": "Post not found"}"#),
            Some("Post not found".to_string())
        );
        assert_eq!(parse_message(r#"{"success": false, "message": ""}"#), None);
        assert_eq!(parse_message("<html>502</html>"), None);
    }
}

// Request and response types for the forum backend.

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Display name used for comment authors the backend doesn't name.
pub const ANONYMOUS_FRIEND: &str = "Anonymous Friend";

/// The logged-in user, as returned by `/login` and `/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub user_id: i64,
    pub name: String,
}

/// Raw body of `/login` and `/register`.
///
/// Failures come back as `{"success": false, "message": "..."}` with a 4xx/5xx status.
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub success: bool,
    pub user_id: Option<i64>,
    pub name: Option<String>,
    pub message: Option<String>,
}

impl AuthResponse {
    /// Convert into a session user, or bail with the backend's message
    /// (or `fallback` when it didn't send one).
    pub fn into_user(self, fallback: &str) -> Result<SessionUser> {
        match (self.success, self.user_id, self.name) {
            (true, Some(user_id), Some(name)) => Ok(SessionUser { user_id, name }),
            (true, _, _) => anyhow::bail!("Backend reported success but returned no user"),
            (false, _, _) => {
                let message = self.message.filter(|m| !m.is_empty());
                anyhow::bail!("{}", message.as_deref().unwrap_or(fallback))
            }
        }
    }
}

/// Generic error envelope the backend sends with non-success statuses.
#[derive(Debug, Default, Deserialize)]
pub struct ApiMessage {
    pub message: Option<String>,
}

/// A forum post. List responses carry `comment_count`; detail responses carry `comments`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    #[serde(default = "untitled")]
    pub title: String,
    pub category: String,
    pub content: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub author_id: Option<i64>,
    #[serde(default)]
    pub is_anonymous: bool,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub comment_count: Option<u32>,
    #[serde(default)]
    pub comments: Option<Vec<Comment>>,
}

impl Post {
    /// Author name for display. Anonymous posts never show a name.
    pub fn author_display(&self) -> &str {
        if self.is_anonymous {
            return "Anonymous";
        }
        self.author_name.as_deref().unwrap_or("Anonymous")
    }

    /// Number of comments, from the embedded list if present, else the count field.
    pub fn comment_total(&self) -> usize {
        match &self.comments {
            Some(comments) => comments.len(),
            None => self.comment_count.unwrap_or(0) as usize,
        }
    }
}

fn untitled() -> String {
    "Untitled".to_string()
}

/// A comment on a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub content: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub author_name: Option<String>,
}

impl Comment {
    pub fn author_display(&self) -> &str {
        self.author_name.as_deref().unwrap_or(ANONYMOUS_FRIEND)
    }
}

/// Body of `POST /posts`.
#[derive(Debug, Clone, Serialize)]
pub struct NewPost {
    pub title: String,
    pub category: String,
    pub content: String,
    pub author_id: i64,
    pub is_anonymous: bool,
}

/// Body of `POST /posts/{id}/comments`.
#[derive(Debug, Clone, Serialize)]
pub struct NewComment {
    pub content: String,
    pub author_id: i64,
}

/// Forum categories a post can be filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    MentalHealth,
    Career,
    Academics,
    Relationships,
    General,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::MentalHealth,
        Category::Career,
        Category::Academics,
        Category::Relationships,
        Category::General,
    ];

    /// The label the backend stores and returns.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::MentalHealth => "Mental Health",
            Category::Career => "Career",
            Category::Academics => "Academics",
            Category::Relationships => "Relationships",
            Category::General => "General",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    /// Accepts the backend label or a slug, case-insensitively
    /// ("Mental Health", "mental-health", "mental_health").
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = slug(s);
        Category::ALL
            .into_iter()
            .find(|c| slug(c.as_str()) == wanted)
            .ok_or_else(|| {
                let names: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
                format!("unknown category {s:?} (expected one of: {})", names.join(", "))
            })
    }
}

fn slug(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Which posts the home listing shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, post: &Post) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => post.category == category.as_str(),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("All"),
            CategoryFilter::Only(category) => fmt::Display::fmt(category, f),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

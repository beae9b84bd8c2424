// Forum REST API — typed client for the Care Corner backend.
//
// The backend owns users, posts and comments. ForumBackend is the async seam
// the app controller talks to; ForumClient implements it over reqwest.

pub mod client;
pub mod models;
pub mod traits;

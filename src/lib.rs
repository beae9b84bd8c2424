// Care Corner: command-line client for a peer-support community forum.
//
// This is the library root. The backend owns all forum data; this crate
// holds the client-side pieces: moderation, the API client, the session
// cache, the app controller and terminal rendering.

pub mod api;
pub mod app;
pub mod config;
pub mod moderation;
pub mod output;
pub mod session;

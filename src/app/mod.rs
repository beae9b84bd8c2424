// Application controller — session-aware operations over the forum backend.
//
// AppState replaces ambient globals: it is filled by `App::check_auth` (or a
// login) and emptied by `App::logout`. Every user-facing operation in the
// CLI is one method on App.

pub mod controller;
pub mod state;

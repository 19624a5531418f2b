//! Domain services behind the HTTP routes.
//!
//! `session` keeps the in-memory session table; `github` verifies personal
//! access tokens against the GitHub REST API.

pub mod github;
pub mod session;

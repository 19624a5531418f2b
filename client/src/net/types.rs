//! Shared DTOs for the client/host boundary.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

pub use frames::{Command, Frame};

/// Authenticated GitHub account as reported by `/api/auth/me`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// GitHub numeric account id.
    pub id: i64,
    /// GitHub login handle.
    pub login: String,
    /// Avatar image URL, if available.
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Body of `POST /api/auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub token: String,
}

//! Session management.
//!
//! ARCHITECTURE
//! ============
//! Sessions live in memory for the lifetime of the host process. The browser
//! holds a random token in an HttpOnly cookie; the token maps to the GitHub
//! account that logged in. Restarting the host logs everyone out.
//!
//! Sessions expire a fixed time after creation. Expired entries are rejected
//! on lookup and swept whenever a new session is created.

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use std::collections::HashMap;
use std::fmt::Write;
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::Rng;
use serde::Serialize;
use tokio::sync::RwLock;

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a cryptographically random 32-byte hex token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

/// Account bound to a session, as returned by `/api/auth/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionUser {
    /// GitHub numeric account id.
    pub id: i64,
    /// GitHub login handle.
    pub login: String,
    /// Avatar image URL, if available.
    pub avatar_url: Option<String>,
}

struct Session {
    user: SessionUser,
    expires_at: Instant,
}

/// Token -> user table shared by all handlers.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
    ttl: Duration,
}

impl SessionStore {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self { sessions: Arc::default(), ttl }
    }

    /// Create a session for `user`, returning the token. Expired sessions are
    /// dropped first.
    pub async fn create(&self, user: SessionUser) -> String {
        let token = generate_token();
        let now = Instant::now();
        let expires_at = now.checked_add(self.ttl).unwrap_or(now);

        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, session| session.expires_at > now);
        sessions.insert(token.clone(), Session { user, expires_at });
        token
    }

    /// User for `token`, if the session exists and has not expired.
    pub async fn validate(&self, token: &str) -> Option<SessionUser> {
        let now = Instant::now();
        {
            let sessions = self.sessions.read().await;
            match sessions.get(token) {
                Some(session) if session.expires_at > now => return Some(session.user.clone()),
                Some(_) => {}
                None => return None,
            }
        }
        self.sessions.write().await.remove(token);
        None
    }

    /// Delete a session. Returns whether it existed.
    pub async fn delete(&self, token: &str) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }

    /// Number of stored sessions, including expired ones not yet swept.
    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

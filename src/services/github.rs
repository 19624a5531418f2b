//! GitHub token verification.
//!
//! The Auth screen posts a personal access token; the host asks
//! `GET {GITHUB_API_URL}/user` who it belongs to and binds a session to that
//! account. The verifier is a trait so route tests can run without GitHub.

#[cfg(test)]
#[path = "github_test.rs"]
mod tests;

use serde::Deserialize;

use super::session::SessionUser;

#[derive(Debug, Deserialize)]
struct GitHubUser {
    id: i64,
    login: String,
    #[serde(default)]
    avatar_url: Option<String>,
}

impl From<GitHubUser> for SessionUser {
    fn from(gh: GitHubUser) -> Self {
        Self { id: gh.id, login: gh.login, avatar_url: gh.avatar_url }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GitHubError {
    /// GitHub answered 401/403: the token is bad or lacks scope.
    #[error("github rejected the token")]
    Rejected,
    #[error("github api error: {0}")]
    Api(String),
    #[error("github request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Resolves an access token to the account that owns it.
#[async_trait::async_trait]
pub trait TokenVerifier: Send + Sync {
    /// # Errors
    ///
    /// [`GitHubError::Rejected`] for invalid tokens, other variants when
    /// GitHub cannot be asked.
    async fn verify(&self, token: &str) -> Result<SessionUser, GitHubError>;
}

/// [`TokenVerifier`] backed by the GitHub REST API.
pub struct GitHubClient {
    http: reqwest::Client,
    api_url: String,
}

impl GitHubClient {
    #[must_use]
    pub fn new(api_url: impl Into<String>) -> Self {
        Self { http: reqwest::Client::new(), api_url: api_url.into() }
    }
}

#[async_trait::async_trait]
impl TokenVerifier for GitHubClient {
    async fn verify(&self, token: &str) -> Result<SessionUser, GitHubError> {
        let resp = self
            .http
            .get(format!("{}/user", self.api_url))
            .header("Authorization", format!("Bearer {token}"))
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", "gistdesk")
            .send()
            .await?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(GitHubError::Rejected);
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GitHubError::Api(format!("{status}: {body}")));
        }

        let user = resp.json::<GitHubUser>().await?;
        Ok(user.into())
    }
}

//! REST API helpers for communicating with the host.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning [`ApiError::Unavailable`] since these
//! endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every call returns a `Result`; a 401 from `/api/auth/me` is not an error
//! but "nobody is logged in" and comes back as `Ok(None)`.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::User;

/// Failure talking to the host.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("not available outside the browser")]
    Unavailable,
}

/// How a `/api/auth/me` response status should be read.
#[cfg(any(test, feature = "hydrate"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MeStatus {
    Authenticated,
    Anonymous,
    Failed(u16),
}

#[cfg(any(test, feature = "hydrate"))]
fn classify_me_status(status: u16) -> MeStatus {
    match status {
        200..=299 => MeStatus::Authenticated,
        401 | 403 => MeStatus::Anonymous,
        other => MeStatus::Failed(other),
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn expect_success(status: u16) -> Result<(), ApiError> {
    if (200..300).contains(&status) { Ok(()) } else { Err(ApiError::Status(status)) }
}

/// Fetch the currently authenticated user from `/api/auth/me`.
///
/// # Errors
///
/// Returns an error when the host cannot be reached or answers with a
/// status other than success or 401/403.
pub async fn fetch_current_user() -> Result<Option<User>, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get("/api/auth/me")
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        match classify_me_status(resp.status()) {
            MeStatus::Authenticated => {
                let user = resp.json::<User>().await.map_err(|e| ApiError::Request(e.to_string()))?;
                Ok(Some(user))
            }
            MeStatus::Anonymous => Ok(None),
            MeStatus::Failed(status) => Err(ApiError::Status(status)),
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err(ApiError::Unavailable)
    }
}

/// Exchange a GitHub token for a host session via `POST /api/auth/login`.
///
/// # Errors
///
/// Returns an error if the host rejects the token or cannot be reached.
pub async fn login(token: &str) -> Result<User, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let body = super::types::LoginRequest { token: token.to_owned() };
        let resp = gloo_net::http::Request::post("/api/auth/login")
            .json(&body)
            .map_err(|e| ApiError::Request(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        expect_success(resp.status())?;
        resp.json::<User>().await.map_err(|e| ApiError::Request(e.to_string()))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = token;
        Err(ApiError::Unavailable)
    }
}

/// Log out the current user by calling `POST /api/auth/logout`.
///
/// # Errors
///
/// Returns an error if the host cannot be reached or refuses the request.
pub async fn logout() -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post("/api/auth/logout")
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        expect_success(resp.status())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err(ApiError::Unavailable)
    }
}

/// Ask the host to close the application via `POST /api/app/close`.
///
/// # Errors
///
/// Returns an error if the host cannot be reached.
pub async fn close_app() -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post("/api/app/close")
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        expect_success(resp.status())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err(ApiError::Unavailable)
    }
}

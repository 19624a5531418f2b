//! Auth routes: token login, session lookup, logout.

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;

use axum::extract::{FromRef, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Json, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use time::Duration;

use crate::services::github::GitHubError;
use crate::services::session::SessionUser;
use crate::state::AppState;

pub(crate) const COOKIE_NAME: &str = "session_token";

fn session_cookie(value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((COOKIE_NAME, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Authenticated user extracted from the session cookie.
/// Use as a handler parameter to require authentication.
pub struct AuthUser {
    pub user: SessionUser,
    pub token: String,
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(COOKIE_NAME).map(Cookie::value).unwrap_or_default();
        if token.is_empty() {
            return Err(StatusCode::UNAUTHORIZED);
        }

        let app_state = AppState::from_ref(state);
        let user = app_state.sessions.validate(token).await.ok_or(StatusCode::UNAUTHORIZED)?;

        Ok(Self { user, token: token.to_owned() })
    }
}

/// Guard for endpoints a foreign web page must not reach.
///
/// Browsers attach `Origin` to cross-origin and same-origin POSTs and to
/// websocket upgrades. A request carrying an `Origin` outside
/// `config.allowed_origins` is refused with 403. Requests without the header
/// come from non-browser clients such as the CLI and pass.
pub struct TrustedOrigin;

impl<S> axum::extract::FromRequestParts<S> for TrustedOrigin
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Some(origin) = parts.headers.get(header::ORIGIN) else {
            return Ok(Self);
        };

        let app_state = AppState::from_ref(state);
        let trusted = origin
            .to_str()
            .is_ok_and(|origin| app_state.config.allowed_origins.iter().any(|allowed| allowed == origin));
        if trusted {
            Ok(Self)
        } else {
            tracing::warn!(?origin, path = %parts.uri.path(), "refusing request from foreign origin");
            Err(StatusCode::FORBIDDEN)
        }
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

#[derive(Deserialize)]
pub struct LoginBody {
    token: String,
}

/// `POST /api/auth/login`: verify a GitHub token, create a session, set cookie.
pub async fn login(
    _origin: TrustedOrigin,
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginBody>,
) -> Response {
    let token = body.token.trim();
    if token.is_empty() {
        return (StatusCode::BAD_REQUEST, "token required").into_response();
    }

    let user = match state.verifier.verify(token).await {
        Ok(user) => user,
        Err(GitHubError::Rejected) => {
            return (StatusCode::UNAUTHORIZED, "GitHub rejected the token").into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, "github token verification failed");
            return (StatusCode::BAD_GATEWAY, "Failed to reach GitHub").into_response();
        }
    };

    let session = state.sessions.create(user.clone()).await;
    let sessions = state.sessions.count().await;
    tracing::info!(login = %user.login, sessions, "auth: session created");

    let jar = jar.add(session_cookie(session, state.config.cookie_secure));
    (jar, Json(user)).into_response()
}

/// `GET /api/auth/me`: return current user.
pub async fn me(auth: AuthUser) -> Json<SessionUser> {
    Json(auth.user)
}

/// `POST /api/auth/logout`: delete session, clear cookie.
pub async fn logout(_origin: TrustedOrigin, State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    state.sessions.delete(&auth.token).await;
    tracing::info!(login = %auth.user.login, "auth: session ended");

    let mut cookie = session_cookie(String::new(), state.config.cookie_secure);
    cookie.set_max_age(Duration::ZERO);

    let jar = CookieJar::new().add(cookie);
    (jar, StatusCode::NO_CONTENT)
}

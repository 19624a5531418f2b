//! Route table and the authentication guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! The Leptos router hands every path to [`AppRoute::resolve`]; the protected
//! outlet then runs [`guard`] against the current auth flag and either renders
//! the resolved screen or redirects to `/auth`.
//!
//! Templates use `:name` for a required segment and `:name?` for an optional
//! one. Matching is by prefix at segment boundaries: `/auth/extra` still
//! resolves to the Auth screen, `/authx` does not.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use std::collections::BTreeMap;

/// Captured path parameters, keyed by template name without the leading `:`.
pub type Params = BTreeMap<String, String>;

pub const AUTH_PATH: &str = "/auth";
pub const GIST_TEMPLATE: &str = "/gist/:gistId?/:gistName?";
pub const ERROR_TEMPLATE: &str = "/error/:errorType?";
pub const HOME_PATH: &str = "/";

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Match `path` against `template`.
///
/// Returns the captured parameters when every non-optional template segment
/// lines up with the start of `path`. Trailing path segments are allowed.
#[must_use]
pub fn match_path(template: &str, path: &str) -> Option<Params> {
    let mut params = Params::new();
    let mut parts = segments(path).peekable();

    for seg in segments(template) {
        if let Some(name) = seg.strip_prefix(':') {
            let (name, optional) = match name.strip_suffix('?') {
                Some(name) => (name, true),
                None => (name, false),
            };
            match parts.next() {
                Some(value) => {
                    params.insert(name.to_owned(), value.to_owned());
                }
                None if optional => {}
                None => return None,
            }
        } else if parts.next() != Some(seg) {
            return None;
        }
    }

    Some(params)
}

/// Whether a route needs an authenticated session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Public,
    Protected,
}

/// Screens the application can show.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppRoute {
    Home,
    Auth,
    Gist { gist_id: Option<String>, gist_name: Option<String> },
    Error { error_type: Option<String> },
}

impl AppRoute {
    /// Resolve a path through the route table. First match wins; Home
    /// catches everything the other templates reject.
    #[must_use]
    pub fn resolve(path: &str) -> Self {
        if match_path(AUTH_PATH, path).is_some() {
            return Self::Auth;
        }
        if let Some(mut params) = match_path(GIST_TEMPLATE, path) {
            return Self::Gist { gist_id: params.remove("gistId"), gist_name: params.remove("gistName") };
        }
        if let Some(mut params) = match_path(ERROR_TEMPLATE, path) {
            return Self::Error { error_type: params.remove("errorType") };
        }
        Self::Home
    }

    #[must_use]
    pub fn access(&self) -> Access {
        match self {
            Self::Gist { .. } => Access::Protected,
            Self::Home | Self::Auth | Self::Error { .. } => Access::Public,
        }
    }

    /// Canonical path for this route. Parameters are interpolated as-is.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Home => HOME_PATH.to_owned(),
            Self::Auth => AUTH_PATH.to_owned(),
            Self::Gist { gist_id: Some(id), gist_name: Some(name) } => format!("/gist/{id}/{name}"),
            Self::Gist { gist_id: Some(id), gist_name: None } => format!("/gist/{id}"),
            Self::Gist { gist_id: None, .. } => "/gist".to_owned(),
            Self::Error { error_type: Some(kind) } => format!("/error/{kind}"),
            Self::Error { error_type: None } => "/error".to_owned(),
        }
    }
}

/// A navigation target, optionally remembering the location a redirect
/// pre-empted.
///
/// `search` keeps its leading `?` and `hash` its leading `#`; both are empty
/// when absent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub search: String,
    pub hash: String,
    pub from: Option<Box<Location>>,
}

fn with_marker(marker: char, raw: &str) -> String {
    let bare = raw.strip_prefix(marker).unwrap_or(raw);
    if bare.is_empty() { String::new() } else { format!("{marker}{bare}") }
}

impl Location {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into(), search: String::new(), hash: String::new(), from: None }
    }

    /// Location with a query string and fragment. Either may be given with or
    /// without its `?` / `#` marker.
    pub fn with_query(path: impl Into<String>, search: &str, hash: &str) -> Self {
        Self { search: with_marker('?', search), hash: with_marker('#', hash), ..Self::new(path) }
    }

    /// Full in-app URL: path, then query, then fragment.
    #[must_use]
    pub fn href(&self) -> String {
        format!("{}{}{}", self.path, self.search, self.hash)
    }
}

/// What the outlet should do for a navigation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardOutcome {
    Render(AppRoute),
    Redirect(Location),
}

/// Decide whether `route` may render at `location`.
///
/// Protected routes redirect to `/auth` when unauthenticated, carrying the
/// attempted location in `from`. Public routes always render.
#[must_use]
pub fn guard(route: &AppRoute, location: &Location, authenticated: bool) -> GuardOutcome {
    match route.access() {
        Access::Protected if !authenticated => {
            GuardOutcome::Redirect(Location { from: Some(Box::new(location.clone())), ..Location::new(AUTH_PATH) })
        }
        _ => GuardOutcome::Render(route.clone()),
    }
}

//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Provided as an `RwSignal<AuthState>` context by the root view. The route
//! guard reads `logged_in`; the loading overlay reads `fetching` and
//! `logging_out`. Nothing writes the fields directly: every change goes
//! through [`AuthState::apply`].

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;

use crate::net::types::User;

/// Authentication state tracking the current user and in-flight work.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub logged_in: bool,
    /// An auth check has completed, successfully or not.
    pub fetched: bool,
    pub fetching: bool,
    pub logging_out: bool,
    pub user: Option<User>,
}

/// State transitions for [`AuthState`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthAction {
    FetchStart,
    /// The host answered; `None` means nobody is logged in.
    FetchSuccess(Option<User>),
    FetchFailure,
    LogoutStart,
    LogoutComplete,
    /// The Auth screen exchanged a token for a session.
    LoginSuccess(User),
    /// Forget everything so a new fetch may be issued.
    Reset,
}

/// Where the one-time auth check stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchPhase {
    Idle,
    Fetching,
    Settled,
}

impl AuthState {
    pub fn apply(&mut self, action: AuthAction) {
        match action {
            AuthAction::FetchStart => {
                self.fetching = true;
            }
            AuthAction::FetchSuccess(user) => {
                self.fetching = false;
                self.fetched = true;
                self.logged_in = user.is_some();
                self.user = user;
            }
            AuthAction::FetchFailure => {
                self.fetching = false;
                self.fetched = true;
                self.logged_in = false;
                self.user = None;
            }
            AuthAction::LogoutStart => {
                self.logging_out = true;
            }
            AuthAction::LogoutComplete => {
                self.logging_out = false;
                self.logged_in = false;
                self.user = None;
            }
            AuthAction::LoginSuccess(user) => {
                self.fetched = true;
                self.logged_in = true;
                self.user = Some(user);
            }
            AuthAction::Reset => *self = Self::default(),
        }
    }

    #[must_use]
    pub fn fetch_phase(&self) -> FetchPhase {
        if self.fetching {
            FetchPhase::Fetching
        } else if self.fetched {
            FetchPhase::Settled
        } else {
            FetchPhase::Idle
        }
    }

    /// True when no auth check has been issued yet.
    #[must_use]
    pub fn needs_fetch(&self) -> bool {
        self.fetch_phase() == FetchPhase::Idle
    }

    /// Show the loading overlay.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.fetching || self.logging_out
    }
}

/// Build a dispatch function that applies actions to the shared auth signal.
pub fn auth_dispatcher(auth: RwSignal<AuthState>) -> impl Fn(AuthAction) + Clone + 'static {
    move |action| auth.update(|state| state.apply(action))
}

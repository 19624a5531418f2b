//! Logout and close actions triggered from the header.
//!
//! Logout asks for a blocking confirmation first and does nothing when the
//! user declines. Close is unconditional: the host shuts itself down.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::future::Future;

use futures::FutureExt;

use super::auth::AuthAction;
use crate::dispatch::Spawner;
use crate::net::api::ApiError;

pub const LOGOUT_PROMPT: &str = "Do you really want to logout?";

/// Ask `confirm` whether to log out.
pub fn request_logout(confirm: impl FnOnce(&str) -> bool) -> bool {
    confirm(LOGOUT_PROMPT)
}

/// End the session: `LogoutStart`, the host call, then `LogoutComplete`.
///
/// A failed host call is logged; local state is cleared either way.
pub async fn perform_logout<D, F, Fut>(dispatch: D, logout: F)
where
    D: Fn(AuthAction),
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<(), ApiError>>,
{
    dispatch(AuthAction::LogoutStart);
    if let Err(e) = logout().await {
        leptos::logging::warn!("logout request failed: {e}");
    }
    dispatch(AuthAction::LogoutComplete);
}

/// Confirm, then spawn [`perform_logout`]. Returns whether logout started.
pub fn logout_with_confirm<C, D, F, Fut, S>(confirm: C, dispatch: D, logout: F, spawner: &S) -> bool
where
    C: FnOnce(&str) -> bool,
    D: Fn(AuthAction) + 'static,
    F: FnOnce() -> Fut + 'static,
    Fut: Future<Output = Result<(), ApiError>> + 'static,
    S: Spawner,
{
    if !request_logout(confirm) {
        return false;
    }
    spawner.spawn(perform_logout(dispatch, logout).boxed_local());
    true
}

/// Send the close intent to the host.
pub fn close_app<F, Fut, S>(close: F, spawner: &S)
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<(), ApiError>> + 'static,
    S: Spawner,
{
    let request = close();
    spawner.spawn(
        async move {
            if let Err(e) = request.await {
                leptos::logging::warn!("close request failed: {e}");
            }
        }
        .boxed_local(),
    );
}

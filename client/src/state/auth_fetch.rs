//! Completion signal for the one-time auth check.
//!
//! DESIGN
//! ======
//! The signal is a shared future plus an explicit phase. Anything that needs
//! to run "after auth is known" clones the signal and awaits [`wait`]; the
//! future resolves on success and on failure alike. The check itself is
//! spawned immediately so it completes even if nobody ever waits on it.
//!
//! [`wait`]: AuthFetchSignal::wait

#[cfg(test)]
#[path = "auth_fetch_test.rs"]
mod auth_fetch_test;

use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

use futures::FutureExt;
use futures::future::{LocalBoxFuture, Shared};

use super::auth::{AuthAction, AuthState, FetchPhase};
use crate::dispatch::Spawner;
use crate::net::api::ApiError;
use crate::net::types::User;

/// Awaitable "has the initial auth check completed".
#[derive(Clone)]
pub struct AuthFetchSignal {
    phase: Rc<Cell<FetchPhase>>,
    settled: Shared<LocalBoxFuture<'static, ()>>,
}

impl AuthFetchSignal {
    /// A signal that is already settled.
    #[must_use]
    pub fn resolved() -> Self {
        Self {
            phase: Rc::new(Cell::new(FetchPhase::Settled)),
            settled: futures::future::ready(()).boxed_local().shared(),
        }
    }

    #[must_use]
    pub fn phase(&self) -> FetchPhase {
        self.phase.get()
    }

    /// Future that completes once the check has settled.
    pub fn wait(&self) -> impl Future<Output = ()> + 'static {
        self.settled.clone()
    }
}

/// Issue the auth check unless one was already issued.
///
/// When `auth` is idle this dispatches `FetchStart`, spawns `fetch` and
/// returns a signal that settles after the matching `FetchSuccess` or
/// `FetchFailure` has been dispatched. Otherwise no fetch is made and the
/// returned signal is already settled.
pub fn begin_auth_fetch<D, F, Fut, S>(auth: &AuthState, dispatch: D, fetch: F, spawner: &S) -> AuthFetchSignal
where
    D: Fn(AuthAction) + 'static,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Option<User>, ApiError>> + 'static,
    S: Spawner,
{
    if !auth.needs_fetch() {
        return AuthFetchSignal::resolved();
    }

    dispatch(AuthAction::FetchStart);
    let phase = Rc::new(Cell::new(FetchPhase::Fetching));
    let request = fetch();
    let task_phase = Rc::clone(&phase);
    let settled = async move {
        match request.await {
            Ok(user) => dispatch(AuthAction::FetchSuccess(user)),
            Err(e) => {
                leptos::logging::warn!("auth check failed: {e}");
                dispatch(AuthAction::FetchFailure);
            }
        }
        task_phase.set(FetchPhase::Settled);
    }
    .boxed_local()
    .shared();

    spawner.spawn(settled.clone().boxed_local());
    AuthFetchSignal { phase, settled }
}

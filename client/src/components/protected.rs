//! Guarded outlet for the routed screens.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every navigation and every auth change re-runs [`guard`] on the current
//! path. A redirect records the pre-empted location in [`ReturnTo`] so the
//! Auth screen can send the user back after login.

#[cfg(test)]
#[path = "protected_test.rs"]
mod protected_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use crate::pages::{auth::AuthPage, error::ErrorPage, gist::GistPage, home::HomePage};
use crate::routes::{AppRoute, GuardOutcome, Location, guard};
use crate::state::auth::AuthState;

/// Location a guard redirect interrupted, if any.
#[derive(Clone, Copy)]
pub struct ReturnTo(pub RwSignal<Option<Location>>);

fn render_route(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <HomePage/> }.into_any(),
        AppRoute::Auth => view! { <AuthPage/> }.into_any(),
        AppRoute::Gist { gist_id, gist_name } => view! { <GistPage gist_id=gist_id gist_name=gist_name/> }.into_any(),
        AppRoute::Error { error_type } => view! { <ErrorPage error_type=error_type/> }.into_any(),
    }
}

/// Guard decision for the current location, recomputed on navigation and on
/// every auth change.
pub fn guard_outcome(location: Signal<Location>, auth: RwSignal<AuthState>) -> Memo<GuardOutcome> {
    Memo::new(move |_| {
        let logged_in = auth.with(|a| a.logged_in);
        location.with(|loc| guard(&AppRoute::resolve(&loc.path), loc, logged_in))
    })
}

/// Return-to location after `outcome`. A redirect records what it
/// interrupted; the Auth screen keeps it; any other screen drops it.
fn next_return_to(outcome: &GuardOutcome, current: Option<Location>) -> Option<Location> {
    match outcome {
        GuardOutcome::Redirect(target) => target.from.as_deref().cloned(),
        GuardOutcome::Render(AppRoute::Auth) => current,
        GuardOutcome::Render(_) => None,
    }
}

#[component]
pub fn GuardedScreens() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let ReturnTo(return_to) = expect_context::<ReturnTo>();
    let location = use_location();
    let navigate = use_navigate();

    let current = Signal::derive(move || {
        Location::with_query(location.pathname.get(), &location.search.get(), &location.hash.get())
    });
    let outcome = guard_outcome(current, auth);

    Effect::new(move || {
        let outcome = outcome.get();
        let next = next_return_to(&outcome, return_to.get_untracked());
        if return_to.with_untracked(|r| *r != next) {
            return_to.set(next);
        }
        if let GuardOutcome::Redirect(target) = outcome {
            navigate(&target.path, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    move || match outcome.get() {
        GuardOutcome::Render(route) => render_route(route),
        GuardOutcome::Redirect(_) => ().into_any(),
    }
}

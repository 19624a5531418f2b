//! Top-right session buttons: Logout (only with a session) and Close.

use leptos::prelude::*;

use crate::dispatch::LocalTasks;
use crate::net::api;
use crate::state::auth::{AuthState, auth_dispatcher};
use crate::state::session::{close_app, logout_with_confirm};

/// Blocking yes/no prompt. Outside the browser nobody can answer, so it
/// declines.
fn confirm(message: &str) -> bool {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = message;
        false
    }
}

#[component]
pub fn Header() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let authed = move || auth.with(|a| a.logged_in);

    let on_logout = move |_| {
        logout_with_confirm(confirm, auth_dispatcher(auth), api::logout, &LocalTasks);
    };
    let on_close = move |_| {
        close_app(api::close_app, &LocalTasks);
    };

    view! {
        <div class="header">
            {move || {
                authed()
                    .then(|| {
                        view! {
                            <button class="btn header__logout" on:click=on_logout>
                                "Logout"
                            </button>
                        }
                    })
            }}
            <button class="btn header__close" title="Close" on:click=on_close>
                "X"
            </button>
        </div>
    }
}

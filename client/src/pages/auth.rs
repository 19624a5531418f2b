//! Auth screen: exchange a GitHub personal access token for a host session.
//!
//! Once a session exists the screen sends the user on to the location the
//! guard interrupted, or home when there is none.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::protected::ReturnTo;
use crate::routes::{HOME_PATH, Location};
use crate::state::auth::AuthState;

fn validate_token_input(token: &str) -> Result<String, &'static str> {
    let token = token.trim();
    if token.is_empty() {
        return Err("Enter a GitHub personal access token.");
    }
    if token.chars().any(char::is_whitespace) {
        return Err("Tokens cannot contain spaces.");
    }
    Ok(token.to_owned())
}

/// Where to go after a successful login.
fn return_path(return_to: Option<&Location>) -> String {
    return_to.map_or_else(|| HOME_PATH.to_owned(), Location::href)
}

#[component]
pub fn AuthPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let ReturnTo(return_to) = expect_context::<ReturnTo>();
    let navigate = use_navigate();

    let token = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    Effect::new(move || {
        if auth.with(|a| a.logged_in) {
            let target = return_to.with_untracked(|r| return_path(r.as_ref()));
            return_to.set(None);
            navigate(&target, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let token_value = match validate_token_input(&token.get()) {
            Ok(value) => value,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Signing in...".to_owned());

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            use crate::state::auth::AuthAction;

            match crate::net::api::login(&token_value).await {
                Ok(user) => {
                    token.set(String::new());
                    info.set(String::new());
                    auth.update(|a| a.apply(AuthAction::LoginSuccess(user)));
                }
                Err(e) => info.set(format!("Sign-in failed: {e}")),
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = token_value;
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Sign in"</h1>
                <p class="login-card__subtitle">"GitHub personal access token"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="password"
                        autocomplete="off"
                        placeholder="ghp_..."
                        prop:value=move || token.get()
                        on:input=move |ev| token.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Sign in"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
            </div>
        </div>
    }
}

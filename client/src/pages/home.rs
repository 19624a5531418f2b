//! Landing screen.

use leptos::prelude::*;

use crate::config::APP;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="home-page">
            <h1>{APP.name}</h1>
            <p>"Waiting for a gist to open."</p>
            <a href="/gist" class="btn">
                "New gist"
            </a>
        </div>
    }
}

//! Gist screen. Protected: only reachable through the guard with a session.

use leptos::prelude::*;

#[component]
pub fn GistPage(gist_id: Option<String>, gist_name: Option<String>) -> impl IntoView {
    let title = match (&gist_id, &gist_name) {
        (Some(id), Some(name)) => format!("{name} ({id})"),
        (Some(id), None) => id.clone(),
        (None, _) => "New gist".to_owned(),
    };

    view! {
        <div class="gist-page">
            <h2 class="gist-page__title">{title}</h2>
        </div>
    }
}

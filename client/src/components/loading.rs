//! Full-window overlay shown while auth work is in flight.

use leptos::prelude::*;

#[component]
pub fn Loading() -> impl IntoView {
    view! {
        <div class="loading" role="status">
            <div class="loading__spinner"></div>
        </div>
    }
}

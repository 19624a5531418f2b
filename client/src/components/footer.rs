//! "Powered by" footer linking to the application homepage.

use leptos::prelude::*;

use crate::config::APP;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class="footer">
            "Powered by "
            <a href=APP.website target="_blank" rel="noopener noreferrer">
                {APP.name}
            </a>
        </footer>
    }
}

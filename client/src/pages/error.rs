//! Error screen addressed as `/error/:errorType?`.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use leptos::prelude::*;

/// Human-readable message for an error type from the path.
pub fn error_message(error_type: Option<&str>) -> String {
    match error_type {
        Some("offline") => "The host is not reachable.".to_owned(),
        Some("not-found") => "That gist could not be found.".to_owned(),
        Some("unauthorized") => "Your session is no longer valid.".to_owned(),
        Some(other) => format!("Something went wrong ({other})."),
        None => "Something went wrong.".to_owned(),
    }
}

#[component]
pub fn ErrorPage(error_type: Option<String>) -> impl IntoView {
    let message = error_message(error_type.as_deref());

    view! {
        <div class="error-page">
            <p class="error-page__message">{message}</p>
            <a href="/">"Back"</a>
        </div>
    }
}

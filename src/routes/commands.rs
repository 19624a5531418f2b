//! Command publishing and the close intent.
//!
//! `POST /api/commands` is how external tools (the CLI) reach open app
//! windows. `POST /api/app/close` is sent by the app's Close button and
//! stops the host. Both refuse browser requests from foreign origins.

#[cfg(test)]
#[path = "commands_test.rs"]
mod tests;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use frames::Command;

use crate::routes::auth::TrustedOrigin;
use crate::state::{AppState, PublishError};

/// `POST /api/commands`: validate and broadcast an `app.command` frame.
pub async fn publish(_origin: TrustedOrigin, State(state): State<AppState>, Json(command): Json<Command>) -> Response {
    match state.publish_command(&command, Some("api")) {
        Ok(receivers) => {
            tracing::info!(name = %command.name, receivers, "command published");
            Json(serde_json::json!({ "receivers": receivers })).into_response()
        }
        Err(PublishError::Invalid(e)) => {
            tracing::warn!(error = %e, "command rejected");
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
        Err(PublishError::Encode(e)) => {
            tracing::error!(error = %e, "command encoding failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// `POST /api/app/close`: ask the server loop to shut down gracefully.
pub async fn close(_origin: TrustedOrigin, State(state): State<AppState>) -> StatusCode {
    tracing::info!("close requested");
    state.shutdown.notify_one();
    StatusCode::ACCEPTED
}

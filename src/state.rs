//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! Commands fan out through a broadcast channel: every open `/api/ws`
//! connection holds its own receiver, so a publish reaches all app windows.

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;

use std::sync::Arc;

use frames::{Command, CommandError, Frame};
use tokio::sync::{Notify, broadcast};

use crate::config::HostConfig;
use crate::services::github::{GitHubClient, TokenVerifier};
use crate::services::session::SessionStore;

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error(transparent)]
    Invalid(#[from] CommandError),
    #[error(transparent)]
    Encode(#[from] frames::CodecError),
}

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<HostConfig>,
    pub sessions: SessionStore,
    pub commands: broadcast::Sender<Frame>,
    pub verifier: Arc<dyn TokenVerifier>,
    /// Fired once when the app asks the host to close.
    pub shutdown: Arc<Notify>,
}

impl AppState {
    #[must_use]
    pub fn new(config: HostConfig) -> Self {
        let verifier = Arc::new(GitHubClient::new(config.github_api_url.clone()));
        Self::with_verifier(config, verifier)
    }

    #[must_use]
    pub fn with_verifier(config: HostConfig, verifier: Arc<dyn TokenVerifier>) -> Self {
        let (commands, _) = broadcast::channel(config.command_channel_capacity);
        Self {
            sessions: SessionStore::new(config.session_ttl),
            config: Arc::new(config),
            commands,
            verifier,
            shutdown: Arc::new(Notify::new()),
        }
    }

    /// Validate `command` and send it to every connected app.
    ///
    /// Returns the number of receivers; zero when no app is connected.
    ///
    /// # Errors
    ///
    /// [`PublishError::Invalid`] for unknown names or an `edit` without gist
    /// coordinates.
    pub fn publish_command(&self, command: &Command, from: Option<&str>) -> Result<usize, PublishError> {
        command.intent()?;
        let mut frame = Frame::command(command)?;
        if let Some(from) = from {
            frame = frame.with_from(from);
        }
        Ok(self.commands.send(frame).unwrap_or(0))
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

//! Shared frame model and command payloads for the host <-> app channel.
//!
//! This crate owns the wire representation used by the host, the browser app
//! and the CLI. Frames travel as JSON text over the command websocket; the
//! payload stays a flexible `serde_json::Value` so new channels do not need a
//! new envelope.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Channel name the app registers its command handler under.
pub const APP_COMMAND: &str = "app.command";

/// Greeting sent by the host right after a websocket upgrade.
pub const SESSION_CONNECTED: &str = "session:connected";

/// Error returned by [`decode_frame`] and the frame constructors.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The text is not a valid JSON frame.
    #[error("failed to decode frame: {0}")]
    Json(#[from] serde_json::Error),
}

/// A single message on the command channel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Unique identifier for this frame (UUID string).
    pub id: String,
    /// Milliseconds since the Unix epoch when the frame was created.
    #[serde(default)]
    pub ts: i64,
    /// Sender identifier (session login or system label).
    #[serde(default)]
    pub from: Option<String>,
    /// Channel name, e.g. `"app.command"`.
    pub syscall: String,
    /// Arbitrary JSON payload.
    #[serde(default = "empty_object")]
    pub data: Value,
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

fn now_ms() -> i64 {
    let Ok(dur) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0;
    };
    i64::try_from(dur.as_millis()).unwrap_or(0)
}

impl Frame {
    /// Create a frame on the given channel.
    ///
    /// Stamps the current wall-clock time, so this is meant for the host and
    /// the CLI rather than the wasm app.
    pub fn request(syscall: impl Into<String>, data: Value) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            ts: now_ms(),
            from: None,
            syscall: syscall.into(),
            data,
        }
    }

    /// Wrap a command in an `app.command` request frame.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Json`] if the command cannot be represented as
    /// JSON.
    pub fn command(command: &Command) -> Result<Self, CodecError> {
        Ok(Self::request(APP_COMMAND, serde_json::to_value(command)?))
    }

    #[must_use]
    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }
}

/// Encode a frame as JSON text.
///
/// # Errors
///
/// Returns [`CodecError::Json`] if serialization fails.
pub fn encode_frame(frame: &Frame) -> Result<String, CodecError> {
    Ok(serde_json::to_string(frame)?)
}

/// Decode JSON text into a frame.
///
/// # Errors
///
/// Returns [`CodecError::Json`] for malformed text or a missing `id`/`syscall`.
pub fn decode_frame(text: &str) -> Result<Frame, CodecError> {
    Ok(serde_json::from_str(text)?)
}

// =============================================================================
// COMMANDS
// =============================================================================

/// External instruction asking the app for a navigation outcome.
///
/// The name is kept as received; [`Command::intent`] decides whether it means
/// anything. Receivers ignore names they do not recognise.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<GistParams>,
}

/// Gist coordinates carried by an `edit` command.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GistParams {
    pub gist_id: String,
    pub gist_name: String,
}

/// What a recognised command asks for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    /// Open the editor on a new gist.
    Create,
    /// Open an existing gist.
    Edit { gist_id: String, gist_name: String },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("command `{0}` requires gistId and gistName")]
    MissingParams(&'static str),
}

impl Command {
    #[must_use]
    pub fn create() -> Self {
        Self { name: "create".to_owned(), params: None }
    }

    #[must_use]
    pub fn edit(gist_id: impl Into<String>, gist_name: impl Into<String>) -> Self {
        Self {
            name: "edit".to_owned(),
            params: Some(GistParams { gist_id: gist_id.into(), gist_name: gist_name.into() }),
        }
    }

    /// Classify the command.
    ///
    /// # Errors
    ///
    /// [`CommandError::Unknown`] for unrecognised names and
    /// [`CommandError::MissingParams`] for an `edit` without gist coordinates.
    pub fn intent(&self) -> Result<Intent, CommandError> {
        match self.name.as_str() {
            "create" => Ok(Intent::Create),
            "edit" => {
                let params = self.params.as_ref().ok_or(CommandError::MissingParams("edit"))?;
                Ok(Intent::Edit { gist_id: params.gist_id.clone(), gist_name: params.gist_name.clone() })
            }
            other => Err(CommandError::Unknown(other.to_owned())),
        }
    }
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;

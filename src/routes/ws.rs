//! WebSocket handler: command delivery to app windows.
//!
//! LIFECYCLE
//! =========
//! 1. Upgrade → subscribe to the command broadcast → send `session:connected`
//! 2. Broadcast command frames → forward to the client as JSON text
//! 3. Client close or socket error → drop the subscription
//!
//! The app never sends anything meaningful upstream; inbound text is ignored.
//! Upgrades from foreign browser origins are refused before the handshake.

#[cfg(test)]
#[path = "ws_test.rs"]
mod tests;

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use frames::{Frame, SESSION_CONNECTED};
use tokio::sync::broadcast;
use tracing::{info, warn};
use uuid::Uuid;

use crate::routes::auth::TrustedOrigin;
use crate::state::AppState;

pub async fn handle_ws(_origin: TrustedOrigin, State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| run_ws(socket, state))
}

async fn run_ws(mut socket: WebSocket, state: AppState) {
    let client_id = Uuid::new_v4();
    // Subscribe before greeting so nothing published after the greeting is missed.
    let mut commands = state.commands.subscribe();

    let welcome = Frame::request(SESSION_CONNECTED, serde_json::json!({ "client_id": client_id.to_string() }));
    if send_frame(&mut socket, &welcome).await.is_err() {
        return;
    }

    info!(%client_id, "ws: client connected");

    loop {
        tokio::select! {
            msg = socket.recv() => {
                let Some(msg) = msg else { break };
                let Ok(msg) = msg else { break };
                if let Message::Close(_) = msg {
                    break;
                }
            }
            frame = commands.recv() => {
                match frame {
                    Ok(frame) => {
                        if send_frame(&mut socket, &frame).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(%client_id, skipped, "ws: client lagged, commands dropped");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    info!(%client_id, "ws: client disconnected");
}

async fn send_frame(socket: &mut WebSocket, frame: &Frame) -> Result<(), ()> {
    let json = match frames::encode_frame(frame) {
        Ok(j) => j,
        Err(e) => {
            warn!(error = %e, "ws: failed to serialize frame");
            return Err(());
        }
    };
    socket.send(Message::Text(json.into())).await.map_err(|_| ())
}

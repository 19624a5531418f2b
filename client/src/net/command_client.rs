//! WebSocket client for the host's command channel.
//!
//! Connects to `/api/ws`, decodes each text frame and hands it to
//! the [`rpc`](super::rpc) registry. Reconnects with exponential backoff when
//! the host goes away.
//!
//! All WebSocket logic is gated behind `#[cfg(feature = "hydrate")]` since it
//! requires a browser environment.

#[cfg(test)]
#[path = "command_client_test.rs"]
mod command_client_test;

use super::rpc;

/// First reconnect delay.
pub const INITIAL_BACKOFF_MS: u32 = 1000;
/// Upper bound for the reconnect delay.
pub const MAX_BACKOFF_MS: u32 = 10_000;

/// Next reconnect delay after a failed or dropped connection.
#[must_use]
pub fn next_backoff(current_ms: u32) -> u32 {
    current_ms.saturating_mul(2).min(MAX_BACKOFF_MS)
}

/// Build the command websocket URL for the page at `href` served from `host`.
#[must_use]
pub fn ws_url(href: &str, host: &str) -> String {
    let proto = if href.starts_with("https") { "wss" } else { "ws" };
    format!("{proto}://{host}/api/ws")
}

/// Decode one text message and dispatch it.
///
/// Returns `true` when a registered handler consumed the frame. Malformed text
/// is dropped.
pub fn handle_text(text: &str) -> bool {
    let frame = match frames::decode_frame(text) {
        Ok(frame) => frame,
        Err(e) => {
            leptos::logging::warn!("command channel: dropping frame: {e}");
            return false;
        }
    };
    rpc::dispatch(&frame)
}

#[cfg(feature = "hydrate")]
thread_local! {
    static STARTED: std::cell::Cell<bool> = const { std::cell::Cell::new(false) };
}

/// Start the command channel as a local async task.
///
/// Only the first call spawns; later calls (root view remounts) are no-ops
/// because handlers live in the shared registry.
#[cfg(feature = "hydrate")]
pub fn spawn_command_client() {
    if STARTED.replace(true) {
        return;
    }
    leptos::task::spawn_local(command_client_loop());
}

/// Main connection loop with reconnect logic.
#[cfg(feature = "hydrate")]
async fn command_client_loop() {
    let mut backoff_ms = INITIAL_BACKOFF_MS;

    loop {
        let href = web_sys::window()
            .and_then(|w| w.location().href().ok())
            .unwrap_or_default();
        let host = web_sys::window()
            .and_then(|w| w.location().host().ok())
            .unwrap_or_else(|| "localhost:3000".to_owned());
        let url = ws_url(&href, &host);

        match connect_and_run(&url).await {
            Ok(()) => {
                leptos::logging::log!("command channel disconnected");
                backoff_ms = INITIAL_BACKOFF_MS;
            }
            Err(e) => leptos::logging::warn!("command channel error: {e}"),
        }

        gloo_timers::future::sleep(std::time::Duration::from_millis(u64::from(backoff_ms))).await;
        backoff_ms = next_backoff(backoff_ms);
    }
}

/// Connect to the WebSocket and process messages until disconnect.
#[cfg(feature = "hydrate")]
async fn connect_and_run(url: &str) -> Result<(), String> {
    use futures::StreamExt;
    use gloo_net::websocket::Message;
    use gloo_net::websocket::futures::WebSocket;

    let mut ws = WebSocket::open(url).map_err(|e| e.to_string())?;

    while let Some(msg) = ws.next().await {
        match msg {
            Ok(Message::Text(text)) => {
                handle_text(&text);
            }
            Ok(Message::Bytes(_)) => {}
            Err(e) => return Err(e.to_string()),
        }
    }

    Ok(())
}

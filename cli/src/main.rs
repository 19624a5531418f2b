//! Command-line source of `app.command` frames.
//!
//! `create` and `edit` publish through the host's REST endpoint; `watch`
//! listens on the same websocket the app uses and prints what arrives.

use std::time::Duration;

use clap::{Parser, Subcommand};
use frames::{Command, Frame};
use futures_util::StreamExt;
use serde_json::Value;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("websocket connect failed: {0}")]
    WsConnect(Box<tokio_tungstenite::tungstenite::Error>),
    #[error("websocket closed")]
    WsClosed,
    #[error("frame decode failed: {0}")]
    Decode(#[from] frames::CodecError),
    #[error("timed out waiting for websocket frame")]
    Timeout,
    #[error("server returned HTTP {status}: {message}")]
    ServerError { status: u16, message: String },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "gistdesk-cli", about = "Send commands to a running gistdesk app")]
struct Cli {
    #[arg(long, env = "GISTDESK_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// Check that the host is up.
    Ping,
    /// Open the editor on a new gist.
    Create,
    /// Open an existing gist.
    Edit { gist_id: String, gist_name: String },
    /// Print frames delivered on the command channel.
    Watch {
        /// Stop after this many frames (the greeting included).
        #[arg(long)]
        count: Option<usize>,
        /// Give up if no frame arrives for this many seconds.
        #[arg(long)]
        timeout_secs: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let base_url = cli.base_url.trim_end_matches('/').to_owned();

    match cli.command {
        CliCommand::Ping => run_ping(&base_url).await,
        CliCommand::Create => run_publish(&base_url, &Command::create()).await,
        CliCommand::Edit { gist_id, gist_name } => run_publish(&base_url, &Command::edit(gist_id, gist_name)).await,
        CliCommand::Watch { count, timeout_secs } => {
            run_watch(&base_url, count, timeout_secs.map(Duration::from_secs)).await
        }
    }
}

async fn run_ping(base_url: &str) -> Result<(), CliError> {
    let response = reqwest::get(format!("{base_url}/healthz")).await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CliError::ServerError { status: status.as_u16(), message: "health check failed".to_owned() });
    }
    println!("ok");
    Ok(())
}

async fn run_publish(base_url: &str, command: &Command) -> Result<(), CliError> {
    let client = reqwest::Client::new();
    let response = client.post(format!("{base_url}/api/commands")).json(command).send().await?;
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    if !status.is_success() {
        return Err(CliError::ServerError { status: status.as_u16(), message: body });
    }

    let value = serde_json::from_str::<Value>(&body)?;
    let receivers = value.get("receivers").and_then(Value::as_u64).unwrap_or(0);
    if receivers == 0 {
        eprintln!("warning: no app window is connected");
    }
    println!("{} delivered to {receivers} window(s)", command.name);
    Ok(())
}

async fn run_watch(base_url: &str, count: Option<usize>, timeout: Option<Duration>) -> Result<(), CliError> {
    let url = ws_url(base_url)?;
    let (mut stream, _) = connect_async(url.as_str()).await.map_err(|e| CliError::WsConnect(Box::new(e)))?;

    let mut seen = 0usize;
    while count.is_none_or(|limit| seen < limit) {
        let frame = recv_next(&mut stream, timeout).await?;
        print_json(&serde_json::to_value(&frame)?)?;
        seen += 1;
    }
    Ok(())
}

fn ws_url(base_url: &str) -> Result<String, CliError> {
    if let Some(rest) = base_url.strip_prefix("http://") {
        return Ok(format!("ws://{rest}/api/ws"));
    }
    if let Some(rest) = base_url.strip_prefix("https://") {
        return Ok(format!("wss://{rest}/api/ws"));
    }

    Err(CliError::InvalidBaseUrl(base_url.to_owned()))
}

async fn recv_next(
    stream: &mut tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>,
    timeout: Option<Duration>,
) -> Result<Frame, CliError> {
    let fut = async {
        loop {
            let Some(message) = stream.next().await else {
                return Err(CliError::WsClosed);
            };
            match message.map_err(|error| CliError::WsConnect(Box::new(error)))? {
                Message::Text(text) => return frames::decode_frame(text.as_str()).map_err(CliError::from),
                Message::Close(_) => return Err(CliError::WsClosed),
                _ => {}
            }
        }
    };

    match timeout {
        Some(limit) => tokio::time::timeout(limit, fut).await.map_err(|_| CliError::Timeout)?,
        None => fut.await,
    }
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;

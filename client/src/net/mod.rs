//! Networking modules for HTTP + the command websocket.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles REST calls to the host, `rpc` keeps the per-channel handler
//! registry, `command_client` manages the websocket lifecycle that feeds it,
//! and `types` defines the shared wire schema.

pub mod api;
pub mod command_client;
pub mod rpc;
pub mod types;

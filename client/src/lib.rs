//! # client
//!
//! Leptos + WASM frontend for gistdesk.
//!
//! The interesting parts are the root view (`app`), the route table and
//! guard (`routes`), the deferred command dispatcher (`dispatch`) and the
//! auth state container (`state::auth`). Pages are thin screens the router
//! renders; the host owns sessions and delivers external commands over the
//! websocket handled in `net`.

pub mod app;
pub mod components;
pub mod config;
pub mod dispatch;
pub mod net;
pub mod pages;
pub mod routes;
pub mod state;

/// Browser entry point: hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);

    leptos::mount::hydrate_body(app::App);
}

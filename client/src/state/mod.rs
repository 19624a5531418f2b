//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! `auth` is the state container the whole app reads through context,
//! `auth_fetch` tracks the one-time auth check the dispatcher waits on, and
//! `session` holds the logout/close actions the header triggers.

pub mod auth;
pub mod auth_fetch;
pub mod session;

//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Screens are thin: the guarded outlet in `components::protected` picks one
//! per path and passes the captured route parameters as props.

pub mod auth;
pub mod error;
pub mod gist;
pub mod home;

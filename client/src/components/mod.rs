//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Chrome around the routed screens (header buttons, loading overlay, footer)
//! plus the guarded outlet that decides which screen renders.

pub mod footer;
pub mod header;
pub mod loading;
pub mod protected;

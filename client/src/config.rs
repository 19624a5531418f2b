//! Build-time application identity shown in the footer.
//!
//! Values come from `GISTDESK_APP_NAME` / `GISTDESK_WEBSITE` at compile time
//! so the wasm bundle needs no runtime config fetch.

/// Name and homepage of the application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub name: &'static str,
    pub website: &'static str,
}

pub const DEFAULT_APP_NAME: &str = "gistdesk";
pub const DEFAULT_WEBSITE: &str = "https://github.com/gistdesk/gistdesk";

/// Application identity for this build.
pub const APP: AppConfig = AppConfig {
    name: match option_env!("GISTDESK_APP_NAME") {
        Some(name) => name,
        None => DEFAULT_APP_NAME,
    },
    website: match option_env!("GISTDESK_WEBSITE") {
        Some(url) => url,
        None => DEFAULT_WEBSITE,
    },
};

//! Host configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::net::IpAddr;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_COMMAND_CHANNEL_CAPACITY: usize = 64;
pub const DEFAULT_SESSION_TTL_HOURS: u64 = 24 * 7;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    pub host: IpAddr,
    pub port: u16,
    /// GitHub REST base URL, without a trailing slash.
    pub github_api_url: String,
    pub cookie_secure: bool,
    pub command_channel_capacity: usize,
    /// Browser origins allowed to call the API. Requests without an `Origin`
    /// header (the CLI) are always allowed.
    pub allowed_origins: Vec<String>,
    pub session_ttl: Duration,
}

/// Origins the app itself is served from for a bind address.
fn default_origins(host: IpAddr, port: u16) -> Vec<String> {
    if host.is_loopback() || host.is_unspecified() {
        vec![format!("http://127.0.0.1:{port}"), format!("http://localhost:{port}")]
    } else {
        vec![format!("http://{host}:{port}")]
    }
}

fn parse_origins(raw: &str) -> Option<Vec<String>> {
    let origins: Vec<String> =
        raw.split(',').map(|o| o.trim().trim_end_matches('/').to_owned()).filter(|o| !o.is_empty()).collect();
    let valid = !origins.is_empty()
        && origins.iter().all(|o| o.starts_with("http://") || o.starts_with("https://"));
    valid.then_some(origins)
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: DEFAULT_PORT,
            github_api_url: DEFAULT_GITHUB_API_URL.to_owned(),
            cookie_secure: false,
            command_channel_capacity: DEFAULT_COMMAND_CHANNEL_CAPACITY,
            allowed_origins: default_origins(IpAddr::from([127, 0, 0, 1]), DEFAULT_PORT),
            session_ttl: Duration::from_secs(DEFAULT_SESSION_TTL_HOURS * 3600),
        }
    }
}

impl HostConfig {
    /// Build typed host config from environment variables.
    ///
    /// Optional:
    /// - `HOST`: bind address, default `127.0.0.1`
    /// - `PORT`: default 3000
    /// - `GITHUB_API_URL`: default `https://api.github.com`
    /// - `COOKIE_SECURE`: `1/true/yes/on` or `0/false/no/off`, default off
    /// - `COMMAND_CHANNEL_CAPACITY`: default 64
    /// - `ALLOWED_ORIGINS`: comma-separated browser origins, default the
    ///   host's own `http://` origin (plus `localhost` when bound to loopback)
    /// - `SESSION_TTL_HOURS`: default 168
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a variable is set but does not
    /// parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`HostConfig::from_env`] with an injectable lookup.
    ///
    /// # Errors
    ///
    /// See [`HostConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let host = parse_var(&lookup, "HOST", defaults.host, |raw| raw.parse().ok())?;
        let port = parse_var(&lookup, "PORT", defaults.port, |raw| raw.parse().ok())?;
        let github_api_url = lookup("GITHUB_API_URL")
            .unwrap_or(defaults.github_api_url)
            .trim_end_matches('/')
            .to_owned();
        let cookie_secure = parse_var(&lookup, "COOKIE_SECURE", defaults.cookie_secure, parse_bool)?;
        let command_channel_capacity = parse_var(
            &lookup,
            "COMMAND_CHANNEL_CAPACITY",
            defaults.command_channel_capacity,
            |raw| raw.parse().ok().filter(|n| *n > 0),
        )?;

        let allowed_origins =
            parse_var(&lookup, "ALLOWED_ORIGINS", default_origins(host, port), parse_origins)?;
        let session_ttl = parse_var(&lookup, "SESSION_TTL_HOURS", defaults.session_ttl, |raw| {
            raw.parse::<u64>().ok().filter(|h| *h > 0).and_then(|h| h.checked_mul(3600)).map(Duration::from_secs)
        })?;

        Ok(Self {
            host,
            port,
            github_api_url,
            cookie_secure,
            command_channel_capacity,
            allowed_origins,
            session_ttl,
        })
    }
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T, ConfigError> {
    match lookup(var) {
        None => Ok(default),
        Some(value) => parse(value.trim()).ok_or(ConfigError::Invalid { var, value }),
    }
}

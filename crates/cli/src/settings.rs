//! Process configuration, read once at startup.
//!
//! Values come from environment variables through an injectable lookup so the
//! parsing rules can be tested without touching the real environment.

use std::net::{AddrParseError, SocketAddr};

use thiserror::Error;
use trigger::{GitHubToken, DEFAULT_API_BASE};

/// Holds the token used for the dispatch call.
pub const TOKEN_VAR: &str = "MY_GITHUB_TOKEN";
/// Overrides the GitHub API base URL (GitHub Enterprise Server).
pub const API_URL_VAR: &str = "GITHUB_API_URL";
/// Socket address the HTTP server binds to.
pub const LISTEN_ADDR_VAR: &str = "TRIGGER_LISTEN_ADDR";

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("{var} is not a valid socket address: {value:?}")]
    InvalidListenAddr {
        var: &'static str,
        value: String,
        #[source]
        source: AddrParseError,
    },

    #[error("{var} must be an http:// or https:// URL, got {value:?}")]
    InvalidApiUrl { var: &'static str, value: String },
}

/// Startup configuration for the trigger server.
#[derive(Debug, Clone)]
pub struct Settings {
    /// `None` when the variable is unset or empty. The server still starts;
    /// every invocation then answers with the token-not-found error.
    pub token: Option<GitHubToken>,
    pub api_base: String,
    pub listen_addr: SocketAddr,
}

impl Settings {
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary key → value lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let token = get(TOKEN_VAR).and_then(GitHubToken::new);

        let api_base = match get(API_URL_VAR) {
            Some(url) if url.starts_with("http://") || url.starts_with("https://") => url,
            Some(url) => {
                return Err(SettingsError::InvalidApiUrl {
                    var: API_URL_VAR,
                    value: url,
                })
            }
            None => DEFAULT_API_BASE.to_owned(),
        };

        let raw_addr = get(LISTEN_ADDR_VAR).unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_owned());
        let listen_addr: SocketAddr =
            raw_addr
                .parse()
                .map_err(|source| SettingsError::InvalidListenAddr {
                    var: LISTEN_ADDR_VAR,
                    value: raw_addr.clone(),
                    source,
                })?;

        Ok(Self {
            token,
            api_base,
            listen_addr,
        })
    }
}

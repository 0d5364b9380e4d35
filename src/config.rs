//! Configuration management for the Spotify proxy.
//!
//! This module handles loading configuration values from environment variables
//! and `.env` files and turns them into a single [`Config`] value. The value is
//! built once at startup and handed to the credential layer and the HTTP server,
//! so nothing downstream reads the process environment on its own.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory, or in the working directory
//! 3. Application defaults (where applicable)

use std::{env, net::SocketAddr, path::PathBuf};

use thiserror::Error;

pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0";
pub const DEFAULT_SCOPES: &[&str] = &[
    "user-read-playback-state",
    "user-modify-playback-state",
    "user-read-currently-playing",
    "user-top-read",
    "user-follow-read",
    "streaming",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Fixed identity of the registered Spotify application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIdentity {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

impl ClientIdentity {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
        }
    }
}

/// Everything the proxy needs to run, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub identity: ClientIdentity,
    pub refresh_token: Option<String>,
    pub token_url: String,
    pub auth_url: String,
    pub api_url: String,
    pub scope: String,
    pub server_address: String,
    pub port: u16,
}

impl Config {
    /// Builds a configuration with Spotify's public endpoints and no refresh token.
    ///
    /// Mostly useful in tests together with the `with_*` overrides.
    pub fn new(identity: ClientIdentity) -> Self {
        Self {
            identity,
            refresh_token: None,
            token_url: DEFAULT_TOKEN_URL.to_string(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            scope: DEFAULT_SCOPES.join(" "),
            server_address: DEFAULT_SERVER_ADDRESS.to_string(),
            port: DEFAULT_PORT,
        }
    }

    pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
        self.refresh_token = Some(refresh_token.into());
        self
    }

    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    pub fn with_auth_url(mut self, url: impl Into<String>) -> Self {
        self.auth_url = url.into();
        self
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Reads the configuration from the process environment.
    ///
    /// Call [`load_env`] first if values should also come from a `.env` file.
    ///
    /// # Required Variables
    ///
    /// - `SPOTIFY_CLIENT_ID`
    /// - `SPOTIFY_CLIENT_SECRET`
    /// - `SPOTIFY_REDIRECT_URI`
    ///
    /// # Optional Variables
    ///
    /// - `SPOTIFY_REFRESH_TOKEN` - operator-managed credential obtained through `/spotify/callback`
    /// - `PORT` - listening port, defaults to `3000`
    /// - `SERVER_ADDRESS` - bind address, defaults to `0.0.0.0`
    /// - `SPOTIFY_API_TOKEN_URL`, `SPOTIFY_API_AUTH_URL`, `SPOTIFY_API_URL` - endpoint overrides
    /// - `SPOTIFY_API_AUTH_SCOPE` - space separated scopes requested at login
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when a required variable is absent or empty,
    /// and [`ConfigError::Invalid`] when `PORT` is not a valid port number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`Config::from_env`] but with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let required = |name: &'static str| var(name).ok_or(ConfigError::Missing(name));

        let identity = ClientIdentity::new(
            required("SPOTIFY_CLIENT_ID")?,
            required("SPOTIFY_CLIENT_SECRET")?,
            required("SPOTIFY_REDIRECT_URI")?,
        );

        let port = match var("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError::Invalid {
                name: "PORT",
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            identity,
            refresh_token: var("SPOTIFY_REFRESH_TOKEN"),
            token_url: var("SPOTIFY_API_TOKEN_URL").unwrap_or_else(|| DEFAULT_TOKEN_URL.into()),
            auth_url: var("SPOTIFY_API_AUTH_URL").unwrap_or_else(|| DEFAULT_AUTH_URL.into()),
            api_url: var("SPOTIFY_API_URL").unwrap_or_else(|| DEFAULT_API_URL.into()),
            scope: var("SPOTIFY_API_AUTH_SCOPE").unwrap_or_else(|| DEFAULT_SCOPES.join(" ")),
            server_address: var("SERVER_ADDRESS")
                .unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.into()),
            port,
        })
    }

    /// Socket address the HTTP server binds to.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.server_address, self.port)
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                name: "SERVER_ADDRESS",
                reason: e.to_string(),
            })
    }
}

/// Loads environment variables from a `.env` file.
///
/// Looks for `spotproxy/.env` in the platform-specific local data directory
/// first and falls back to a `.env` in the working directory. Neither file is
/// mandatory: a deployment that sets real environment variables needs none.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/spotproxy/.env`
/// - macOS: `~/Library/Application Support/spotproxy/.env`
/// - Windows: `%LOCALAPPDATA%/spotproxy/.env`
///
/// # Errors
///
/// Returns an error string if the data directory cannot be created or an
/// existing `.env` file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
        return Ok(());
    }

    match dotenv::dotenv() {
        Ok(_) => Ok(()),
        Err(dotenv::Error::Io(_)) => Ok(()),
        Err(e) => Err(e.to_string()),
    }
}

/// Location of the `.env` file in the local data directory.
pub fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotproxy/.env");
    path
}

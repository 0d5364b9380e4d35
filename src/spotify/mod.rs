//! # Spotify Integration Module
//!
//! This module is the integration layer between the proxy and Spotify. It has
//! two halves:
//!
//! - **Credential lifecycle** ([`auth`]): the authorization-code exchange and
//!   refresh-token renewal against the accounts service token endpoint.
//! - **Web API calls** ([`tracks`], [`artists`], [`player`]): thin wrappers around
//!   the handful of endpoints the proxy exposes, each authenticated with a bearer
//!   obtained from the refresher.
//!
//! ## Architecture
//!
//! ```text
//! HTTP handlers (api)
//!          ↓
//! SpotifyClient ──(one refresh per call)──> CredentialRefresher
//!          ↓                                        ↓
//! Web API (api.spotify.com/v1)          Token endpoint (accounts.spotify.com)
//! ```
//!
//! ## Token Policy
//!
//! Access tokens are never cached. Every protected call starts with a refresh
//! round trip, so the bearer presented downstream is always fresh. Concurrent
//! requests each pay their own refresh; nothing is shared or locked.
//!
//! ## Error Types
//!
//! - [`UpstreamAuthError`] - token endpoint failures, with the provider body kept
//! - [`SpotifyError`] - Web API failures, wrapping auth errors where relevant

pub mod artists;
pub mod auth;
pub mod error;
pub mod player;
pub mod tracks;

pub use auth::{CredentialExchanger, CredentialRefresher, credentials};
pub use error::{SpotifyError, UpstreamAuthError};

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Web API client for the single configured account.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    refresher: CredentialRefresher,
    refresh_token: Option<String>,
}

impl SpotifyClient {
    pub fn new(
        http: Client,
        api_url: impl Into<String>,
        refresher: CredentialRefresher,
        refresh_token: Option<String>,
    ) -> Self {
        Self {
            http,
            api_url: api_url.into(),
            refresher,
            refresh_token,
        }
    }

    pub fn has_refresh_token(&self) -> bool {
        self.refresh_token.is_some()
    }

    /// Mints a fresh bearer for the next request.
    async fn access_token(&self) -> Result<String, SpotifyError> {
        let refresh_token = self
            .refresh_token
            .as_deref()
            .ok_or(SpotifyError::MissingRefreshToken)?;
        Ok(self.refresher.refresh(refresh_token).await?)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url.trim_end_matches('/'), path)
    }

    /// Sends a request with a freshly minted bearer and rejects non-2xx replies.
    async fn send(&self, request: RequestBuilder) -> Result<Response, SpotifyError> {
        let token = self.access_token().await?;
        let res = request.bearer_auth(token).send().await?;
        error_for_status(res).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, SpotifyError> {
        let res = self.send(self.http.get(self.url(path))).await?;
        let bytes = res.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Turns a non-2xx reply into [`SpotifyError::Status`], keeping the body.
async fn error_for_status(res: Response) -> Result<Response, SpotifyError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    let bytes = res.bytes().await?;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };

    Err(SpotifyError::Status { status, body })
}

use std::sync::Arc;

use reqwest::{Client, header::AUTHORIZATION};
use serde::de::DeserializeOwned;

use crate::{
    config::{ClientIdentity, Config},
    spotify::UpstreamAuthError,
    types::{RefreshedToken, TokenPair},
    utils,
};

/// Token endpoint shared by the exchanger and the refresher.
///
/// Holds the HTTP client, the endpoint URL and the precomputed Basic
/// `Authorization` value. Immutable once built.
#[derive(Debug)]
struct TokenEndpoint {
    http: Client,
    token_url: String,
    identity: ClientIdentity,
    authorization: String,
}

impl TokenEndpoint {
    fn new(http: Client, token_url: String, identity: ClientIdentity) -> Self {
        let authorization = utils::basic_auth_header(&identity.client_id, &identity.client_secret);
        Self {
            http,
            token_url,
            identity,
            authorization,
        }
    }

    /// Posts a form-encoded grant and decodes the JSON reply.
    ///
    /// Any non-2xx status is returned as [`UpstreamAuthError::Rejected`] with the
    /// body untouched. No retry is attempted.
    async fn post_grant<T: DeserializeOwned>(
        &self,
        form: &[(&str, &str)],
    ) -> Result<T, UpstreamAuthError> {
        let res = self
            .http
            .post(&self.token_url)
            .header(AUTHORIZATION, self.authorization.as_str())
            .form(form)
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(UpstreamAuthError::Rejected { status, body });
        }

        serde_json::from_str(&body)
            .map_err(|e| UpstreamAuthError::InvalidResponse(format!("{e}: {body}")))
    }
}

/// Builds an exchanger and a refresher sharing one token endpoint.
///
/// # Arguments
///
/// * `http` - HTTP client used for every token request
/// * `config` - supplies the client identity and the token endpoint URL
///
/// # Example
///
/// ```
/// let config = Config::from_env()?;
/// let (exchanger, refresher) = credentials(reqwest::Client::new(), &config);
/// let access_token = refresher.refresh("AQB...refresh_token").await?;
/// ```
pub fn credentials(http: Client, config: &Config) -> (CredentialExchanger, CredentialRefresher) {
    let endpoint = Arc::new(TokenEndpoint::new(
        http,
        config.token_url.clone(),
        config.identity.clone(),
    ));

    (
        CredentialExchanger {
            endpoint: Arc::clone(&endpoint),
        },
        CredentialRefresher { endpoint },
    )
}

/// Performs the one-time authorization-code exchange.
#[derive(Debug, Clone)]
pub struct CredentialExchanger {
    endpoint: Arc<TokenEndpoint>,
}

impl CredentialExchanger {
    pub fn new(http: Client, token_url: impl Into<String>, identity: ClientIdentity) -> Self {
        Self {
            endpoint: Arc::new(TokenEndpoint::new(http, token_url.into(), identity)),
        }
    }

    /// Exchanges an authorization code for a token pair.
    ///
    /// Sends `grant_type=authorization_code`, the code and the configured
    /// redirect URI to the token endpoint, authenticated with the client's
    /// Basic credentials. The provider's reply is returned as-is.
    ///
    /// # Arguments
    ///
    /// * `code` - single-use authorization code received on the redirect callback
    ///
    /// # Returns
    ///
    /// Returns a `Result` containing:
    /// - `Ok(TokenPair)` - access token, refresh token, expiry and token type
    /// - `Err(UpstreamAuthError)` - network failure, rejected code or malformed reply
    ///
    /// # Retry Behavior
    ///
    /// None. Authorization codes are single-use, so a second attempt with the
    /// same code would be refused anyway.
    ///
    /// # Example
    ///
    /// ```
    /// let pair = exchanger.exchange("AQA...auth_code").await?;
    /// println!("SPOTIFY_REFRESH_TOKEN={}", pair.refresh_token);
    /// ```
    pub async fn exchange(&self, code: &str) -> Result<TokenPair, UpstreamAuthError> {
        let endpoint = &self.endpoint;
        let pair: TokenPair = endpoint
            .post_grant(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", endpoint.identity.redirect_uri.as_str()),
            ])
            .await?;

        if pair.access_token.is_empty() || pair.refresh_token.is_empty() {
            return Err(UpstreamAuthError::InvalidResponse(
                "token pair is missing access_token or refresh_token".to_string(),
            ));
        }

        Ok(pair)
    }
}

/// Mints short-lived access tokens from the stored refresh token.
#[derive(Debug, Clone)]
pub struct CredentialRefresher {
    endpoint: Arc<TokenEndpoint>,
}

impl CredentialRefresher {
    pub fn new(http: Client, token_url: impl Into<String>, identity: ClientIdentity) -> Self {
        Self {
            endpoint: Arc::new(TokenEndpoint::new(http, token_url.into(), identity)),
        }
    }

    /// Exchanges a refresh token for a fresh access token.
    ///
    /// Every call goes to the token endpoint; the result is never cached, so
    /// the returned bearer is valid at the time of the call. Only the
    /// `access_token` field of the reply is kept.
    ///
    /// # Arguments
    ///
    /// * `refresh_token` - long-lived credential issued by a previous exchange
    ///
    /// # Errors
    ///
    /// - [`UpstreamAuthError::Rejected`] when the token is invalid or revoked
    /// - [`UpstreamAuthError::Transport`] on network failure
    /// - [`UpstreamAuthError::InvalidResponse`] when the reply has no access token
    pub async fn refresh(&self, refresh_token: &str) -> Result<String, UpstreamAuthError> {
        let token: RefreshedToken = self
            .endpoint
            .post_grant(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ])
            .await?;

        if token.access_token.is_empty() {
            return Err(UpstreamAuthError::InvalidResponse(
                "refresh reply is missing access_token".to_string(),
            ));
        }

        Ok(token.access_token)
    }
}

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Failure talking to the Spotify token endpoint.
///
/// Covers both transport problems and requests the provider refused. The raw
/// provider payload is kept so callers can surface it unchanged.
#[derive(Debug, Error)]
pub enum UpstreamAuthError {
    #[error("token endpoint unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("token endpoint rejected the request ({status}): {body}")]
    Rejected { status: StatusCode, body: String },
    #[error("unexpected token endpoint response: {0}")]
    InvalidResponse(String),
}

impl UpstreamAuthError {
    /// HTTP status returned by the provider, if the request got that far.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Transport(e) => e.status(),
            Self::Rejected { status, .. } => Some(*status),
            Self::InvalidResponse(_) => None,
        }
    }

    /// Raw provider error body.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Rejected { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Failure of a protected Web API call.
#[derive(Debug, Error)]
pub enum SpotifyError {
    #[error("no refresh token configured")]
    MissingRefreshToken,
    #[error(transparent)]
    Auth(#[from] UpstreamAuthError),
    #[error("Spotify API request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Spotify API returned {status}: {body}")]
    Status { status: StatusCode, body: Value },
    #[error("cannot decode Spotify API response: {0}")]
    Decode(#[from] serde_json::Error),
}

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

use crate::{spotify::SpotifyError, warning};

pub const MISSING_REFRESH_TOKEN: &str = "No refresh token configured; visit /spotify/login";

/// JSON error reply of a protected endpoint.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: Value,
}

impl ApiError {
    /// Generic `500 {"error": message}` reply; the underlying cause is logged only.
    pub fn from_spotify(err: SpotifyError, message: &str) -> Self {
        warning!("{}: {}", message, err);
        match err {
            SpotifyError::MissingRefreshToken => Self::missing_refresh_token(),
            _ => Self::internal(message),
        }
    }

    /// Like [`ApiError::from_spotify`], but a Web API error reply is forwarded
    /// with its own status and body.
    pub fn passthrough(err: SpotifyError, message: &str) -> Self {
        match err {
            SpotifyError::Status { status, body } => {
                warning!("{}: {} {}", message, status, body);
                Self { status, body }
            }
            other => Self::from_spotify(other, message),
        }
    }

    pub fn internal(message: &str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: json!({ "error": message }),
        }
    }

    fn missing_refresh_token() -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            body: json!({ "error": MISSING_REFRESH_TOKEN }),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

use axum::{
    Extension,
    response::{IntoResponse, Redirect, Response},
};

use crate::{api::ApiError, server::AppState, utils, warning};

/// Sends the browser to Spotify's consent page.
pub async fn login(Extension(state): Extension<AppState>) -> Response {
    match utils::authorize_url(&state.config) {
        Ok(url) => Redirect::to(url.as_str()).into_response(),
        Err(e) => {
            warning!("Invalid authorization URL {}: {}", state.config.auth_url, e);
            ApiError::internal("Failed to build authorization URL").into_response()
        }
    }
}

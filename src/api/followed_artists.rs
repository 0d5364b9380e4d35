use axum::{
    Extension, Json,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{api::ApiError, server::AppState, utils};

pub const FOLLOWED_ARTISTS_LIMIT: u32 = 20;

pub async fn followed_artists(Extension(state): Extension<AppState>) -> Result<Response, ApiError> {
    let artists = state
        .spotify
        .followed_artists(FOLLOWED_ARTISTS_LIMIT)
        .await
        .map_err(|e| ApiError::from_spotify(e, "Failed to fetch followed artists"))?;

    let simplified = utils::simplify_followed_artists(&artists);
    if simplified.is_empty() {
        return Ok(Json(json!({ "message": "No Artists are followed" })).into_response());
    }

    Ok(Json(simplified).into_response())
}

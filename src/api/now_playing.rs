use axum::{
    Extension, Json,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{api::ApiError, server::AppState, utils};

pub async fn now_playing(Extension(state): Extension<AppState>) -> Result<Response, ApiError> {
    let playing = state
        .spotify
        .currently_playing()
        .await
        .map_err(|e| ApiError::from_spotify(e, "Failed to fetch now playing track"))?;

    // a player without an item is treated like a 204
    match playing.as_ref().and_then(utils::simplify_now_playing) {
        Some(now) => Ok(Json(now).into_response()),
        None => Ok(Json(json!({
            "isPlaying": false,
            "message": "No song currently playing"
        }))
        .into_response()),
    }
}

use axum::{Extension, Json, extract::Path};
use serde_json::{Value, json};

use crate::{api::ApiError, server::AppState};

pub async fn pause(Extension(state): Extension<AppState>) -> Result<Json<Value>, ApiError> {
    state
        .spotify
        .pause()
        .await
        .map_err(|e| ApiError::passthrough(e, "Failed to pause playback"))?;

    Ok(Json(json!({ "message": "Playback paused successfully" })))
}

pub async fn play(
    Path(track_id): Path<String>,
    Extension(state): Extension<AppState>,
) -> Result<Json<Value>, ApiError> {
    state
        .spotify
        .play_track(&track_id)
        .await
        .map_err(|e| ApiError::passthrough(e, "Failed to play track"))?;

    Ok(Json(json!({ "message": format!("Started playing track {track_id}") })))
}

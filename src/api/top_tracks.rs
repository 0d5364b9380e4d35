use axum::{Extension, Json};

use crate::{api::ApiError, server::AppState, types::SimplifiedTrack, utils};

pub const TOP_TRACKS_LIMIT: u32 = 10;

pub async fn top_tracks(
    Extension(state): Extension<AppState>,
) -> Result<Json<Vec<SimplifiedTrack>>, ApiError> {
    let tracks = state
        .spotify
        .top_tracks(TOP_TRACKS_LIMIT)
        .await
        .map_err(|e| ApiError::from_spotify(e, "Failed to fetch top tracks"))?;

    Ok(Json(utils::simplify_top_tracks(&tracks)))
}

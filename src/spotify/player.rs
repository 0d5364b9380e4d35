use reqwest::StatusCode;
use serde_json::json;

use crate::{
    spotify::{SpotifyClient, SpotifyError},
    types::{CurrentlyPlaying, StartPlaybackRequest},
};

impl SpotifyClient {
    /// Retrieves the track currently loaded in the user's player.
    ///
    /// Spotify answers `204 No Content` when nothing is playing; that case, and
    /// an empty `200` body, come back as `Ok(None)`.
    pub async fn currently_playing(&self) -> Result<Option<CurrentlyPlaying>, SpotifyError> {
        let res = self
            .send(self.http.get(self.url("/me/player/currently-playing")))
            .await?;

        if res.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let bytes = res.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    /// Pauses playback on the active device.
    pub async fn pause(&self) -> Result<(), SpotifyError> {
        self.send(
            self.http
                .put(self.url("/me/player/pause"))
                .json(&json!({})),
        )
        .await?;
        Ok(())
    }

    /// Starts playing a single track on the active device.
    pub async fn play_track(&self, track_id: &str) -> Result<(), SpotifyError> {
        let body = StartPlaybackRequest {
            uris: vec![format!("spotify:track:{track_id}")],
        };
        self.send(self.http.put(self.url("/me/player/play")).json(&body))
            .await?;
        Ok(())
    }
}

use crate::{
    spotify::{SpotifyClient, SpotifyError},
    types::{TopTracksResponse, Track},
};

impl SpotifyClient {
    /// Retrieves the user's top tracks.
    ///
    /// # Arguments
    ///
    /// * `limit` - maximum number of tracks to return (1-50)
    ///
    /// # Example
    ///
    /// ```
    /// let tracks = spotify.top_tracks(10).await?;
    /// ```
    pub async fn top_tracks(&self, limit: u32) -> Result<Vec<Track>, SpotifyError> {
        let res: TopTracksResponse = self
            .get_json(&format!("/me/top/tracks?limit={limit}"))
            .await?;
        Ok(res.items)
    }
}

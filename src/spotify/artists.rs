use crate::{
    spotify::{SpotifyClient, SpotifyError},
    types::{FollowedArtist, FollowedArtistsResponse},
};

impl SpotifyClient {
    /// Retrieves the first page of artists the user follows.
    ///
    /// Only one page is fetched; cursors are not followed.
    pub async fn followed_artists(&self, limit: u32) -> Result<Vec<FollowedArtist>, SpotifyError> {
        let res: FollowedArtistsResponse = self
            .get_json(&format!("/me/following?type=artist&limit={limit}"))
            .await?;
        Ok(res.artists.items)
    }
}

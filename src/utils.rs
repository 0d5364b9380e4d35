use base64::{Engine, engine::general_purpose::STANDARD};
use url::Url;

use crate::{
    config::Config,
    types::{
        CurrentlyPlaying, FollowedArtist, Image, NowPlaying, SimplifiedArtist, SimplifiedTrack,
        Track, TrackArtist,
    },
};

/// `Authorization` header value for the token endpoint: `Basic base64(id:secret)`.
pub fn basic_auth_header(client_id: &str, client_secret: &str) -> String {
    let credentials = format!("{client_id}:{client_secret}");
    format!("Basic {}", STANDARD.encode(credentials.as_bytes()))
}

/// Spotify consent page URL for the authorization-code flow.
pub fn authorize_url(config: &Config) -> Result<Url, url::ParseError> {
    Url::parse_with_params(
        &config.auth_url,
        &[
            ("response_type", "code"),
            ("client_id", config.identity.client_id.as_str()),
            ("scope", config.scope.as_str()),
            ("redirect_uri", config.identity.redirect_uri.as_str()),
        ],
    )
}

/// Escapes text interpolated into the callback page.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn join_artist_names(artists: &[TrackArtist]) -> String {
    artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn first_image_url(images: &[Image]) -> Option<String> {
    images.first().map(|i| i.url.clone())
}

pub fn simplify_top_tracks(tracks: &[Track]) -> Vec<SimplifiedTrack> {
    tracks
        .iter()
        .map(|track| SimplifiedTrack {
            id: track.id.clone(),
            name: track.name.clone(),
            artists: join_artist_names(&track.artists),
            album: track.album.name.clone(),
            preview_url: track.preview_url.clone(),
            external_url: track.external_urls.spotify.clone(),
            album_image: first_image_url(&track.album.images),
        })
        .collect()
}

/// Returns `None` when nothing is loaded in the player (no `item`).
pub fn simplify_now_playing(data: &CurrentlyPlaying) -> Option<NowPlaying> {
    let item = data.item.as_ref()?;

    Some(NowPlaying {
        is_playing: data.is_playing,
        title: item.name.clone(),
        artist: join_artist_names(&item.artists),
        album: item.album.name.clone(),
        album_image_url: first_image_url(&item.album.images),
        track_url: item.external_urls.spotify.clone(),
    })
}

pub fn simplify_followed_artists(artists: &[FollowedArtist]) -> Vec<SimplifiedArtist> {
    artists
        .iter()
        .map(|artist| SimplifiedArtist {
            name: artist.name.clone(),
            genres: artist.genres.clone(),
            followers: artist.followers.total,
            image: first_image_url(&artist.images),
            url: artist.external_urls.spotify.clone(),
        })
        .collect()
}

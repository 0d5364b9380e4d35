use serde_json::json;
use spotproxy::config::{ClientIdentity, Config};
use spotproxy::types::{
    Album, CurrentlyPlaying, ExternalUrls, FollowedArtist, Followers, Image, Track, TrackArtist,
};
use spotproxy::utils::*;

// Helper function to create a test track
fn create_test_track(id: &str, name: &str, artists: &[&str], with_image: bool) -> Track {
    Track {
        id: Some(id.to_string()),
        name: name.to_string(),
        artists: artists
            .iter()
            .map(|a| TrackArtist {
                id: None,
                name: a.to_string(),
            })
            .collect(),
        album: Album {
            id: None,
            name: format!("{} (album)", name),
            images: if with_image {
                vec![
                    Image {
                        url: format!("https://i.scdn.co/image/{}-640", id),
                        height: Some(640),
                        width: Some(640),
                    },
                    Image {
                        url: format!("https://i.scdn.co/image/{}-64", id),
                        height: Some(64),
                        width: Some(64),
                    },
                ]
            } else {
                Vec::new()
            },
        },
        preview_url: None,
        external_urls: ExternalUrls {
            spotify: Some(format!("https://open.spotify.com/track/{}", id)),
        },
    }
}

// Helper function to create a test followed artist
fn create_test_artist(name: &str, followers: u64) -> FollowedArtist {
    FollowedArtist {
        id: format!("{}_id", name),
        name: name.to_string(),
        genres: vec!["indie".to_string(), "rock".to_string()],
        followers: Followers { total: followers },
        images: vec![Image {
            url: format!("https://i.scdn.co/image/{}", name),
            height: None,
            width: None,
        }],
        external_urls: ExternalUrls {
            spotify: Some(format!("https://open.spotify.com/artist/{}", name)),
        },
    }
}

#[test]
fn test_basic_auth_header() {
    assert_eq!(basic_auth_header("cid", "secret"), "Basic Y2lkOnNlY3JldA==");

    // Padding is kept for lengths that need it
    assert_eq!(basic_auth_header("a", "b"), "Basic YTpi");
    assert_eq!(basic_auth_header("ab", "c"), "Basic YWI6Yw==");
}

#[test]
fn test_authorize_url() {
    let config = Config::new(ClientIdentity::new(
        "cid",
        "secret",
        "https://app.example/callback",
    ));
    let url = authorize_url(&config).unwrap();

    assert_eq!(url.host_str(), Some("accounts.spotify.com"));
    assert_eq!(url.path(), "/authorize");

    let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    assert_eq!(
        pairs,
        vec![
            ("response_type".to_string(), "code".to_string()),
            ("client_id".to_string(), "cid".to_string()),
            (
                "scope".to_string(),
                "user-read-playback-state user-modify-playback-state user-read-currently-playing user-top-read user-follow-read streaming".to_string()
            ),
            (
                "redirect_uri".to_string(),
                "https://app.example/callback".to_string()
            ),
        ]
    );

    // Redirect URI must be encoded, not pasted raw
    assert!(url.as_str().contains("redirect_uri=https%3A%2F%2Fapp.example%2Fcallback"));
}

#[test]
fn test_authorize_url_rejects_invalid_base() {
    let config = Config::new(ClientIdentity::new("cid", "secret", "x")).with_auth_url("not a url");
    assert!(authorize_url(&config).is_err());
}

#[test]
fn test_simplify_top_tracks() {
    let tracks = vec![
        create_test_track("t1", "Song One", &["Artist A", "Artist B"], true),
        create_test_track("t2", "Song Two", &["Artist C"], false),
    ];

    let simplified = simplify_top_tracks(&tracks);

    assert_eq!(simplified.len(), 2);
    assert_eq!(simplified[0].id.as_deref(), Some("t1"));
    assert_eq!(simplified[0].name, "Song One");
    assert_eq!(simplified[0].artists, "Artist A, Artist B");
    assert_eq!(simplified[0].album, "Song One (album)");
    assert_eq!(
        simplified[0].album_image.as_deref(),
        Some("https://i.scdn.co/image/t1-640")
    );
    assert_eq!(
        simplified[0].external_url.as_deref(),
        Some("https://open.spotify.com/track/t1")
    );

    // No album art is not an error
    assert_eq!(simplified[1].album_image, None);
    assert_eq!(simplified[1].artists, "Artist C");
}

#[test]
fn test_simplified_track_field_names() {
    let simplified = simplify_top_tracks(&[create_test_track("t1", "Song", &["A"], true)]);
    let value = serde_json::to_value(&simplified[0]).unwrap();

    for key in [
        "id",
        "name",
        "artists",
        "album",
        "preview_url",
        "external_url",
        "album_image",
    ] {
        assert!(value.get(key).is_some(), "missing key {}", key);
    }
}

#[test]
fn test_simplify_now_playing() {
    let data = CurrentlyPlaying {
        is_playing: true,
        item: Some(create_test_track("t9", "Live Song", &["Band", "Guest"], true)),
    };

    let now = simplify_now_playing(&data).unwrap();
    let value = serde_json::to_value(&now).unwrap();

    assert_eq!(
        value,
        json!({
            "isPlaying": true,
            "title": "Live Song",
            "artist": "Band, Guest",
            "album": "Live Song (album)",
            "albumImageUrl": "https://i.scdn.co/image/t9-640",
            "trackUrl": "https://open.spotify.com/track/t9"
        })
    );
}

#[test]
fn test_simplify_now_playing_without_item() {
    let data = CurrentlyPlaying {
        is_playing: false,
        item: None,
    };
    assert!(simplify_now_playing(&data).is_none());
}

#[test]
fn test_simplify_followed_artists() {
    let artists = vec![create_test_artist("Alpha", 1200), create_test_artist("Beta", 3)];
    let simplified = simplify_followed_artists(&artists);

    assert_eq!(simplified.len(), 2);
    assert_eq!(
        serde_json::to_value(&simplified[0]).unwrap(),
        json!({
            "name": "Alpha",
            "genres": ["indie", "rock"],
            "followers": 1200,
            "image": "https://i.scdn.co/image/Alpha",
            "url": "https://open.spotify.com/artist/Alpha"
        })
    );
    assert_eq!(simplified[1].followers, 3);
}

#[test]
fn test_simplify_followed_artists_empty() {
    assert!(simplify_followed_artists(&[]).is_empty());
}

#[test]
fn test_escape_html() {
    assert_eq!(escape_html("AQB-token_123"), "AQB-token_123");
    assert_eq!(
        escape_html("<script>alert('x') & \"y\"</script>"),
        "&lt;script&gt;alert(&#39;x&#39;) &amp; &quot;y&quot;&lt;/script&gt;"
    );
}

#[test]
fn test_track_deserializes_from_spotify_payload() {
    let payload = json!({
        "id": "abc",
        "name": "Track",
        "artists": [{ "id": "a1", "name": "Someone", "type": "artist" }],
        "album": { "id": "al1", "name": "Record", "images": [], "album_type": "album" },
        "preview_url": null,
        "external_urls": { "spotify": "https://open.spotify.com/track/abc" },
        "popularity": 40
    });

    let track: Track = serde_json::from_value(payload).unwrap();
    assert_eq!(track.artists[0].name, "Someone");
    assert!(track.album.images.is_empty());
    assert_eq!(track.preview_url, None);
}

#[test]
fn test_local_track_without_id_deserializes() {
    let payload = json!({
        "id": null,
        "name": "Home Recording",
        "is_local": true,
        "artists": [{ "id": null, "name": "Me" }],
        "album": { "id": null, "name": "Demos", "images": [] },
        "preview_url": null,
        "external_urls": {}
    });

    let track: Track = serde_json::from_value(payload).unwrap();
    assert_eq!(track.id, None);

    let simplified = simplify_top_tracks(&[track]);
    assert_eq!(simplified[0].id, None);
    assert_eq!(simplified[0].external_url, None);
}

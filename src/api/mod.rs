//! # API Module
//!
//! HTTP handlers for the proxy's web server. Every handler receives the shared
//! [`crate::server::AppState`] through an axum `Extension` and stays stateless
//! otherwise.
//!
//! ## Endpoints
//!
//! ### Authentication
//!
//! - [`login`] - Redirects the browser to Spotify's consent page
//! - [`callback`] - Exchanges the returned authorization code and shows the
//!   refresh token the operator must store as `SPOTIFY_REFRESH_TOKEN`
//!
//! ### Protected
//!
//! Each of these refreshes the access token once, calls the Web API and
//! reshapes the reply:
//!
//! - [`now_playing`] - Currently playing track
//! - [`top_tracks`] - The user's top ten tracks
//! - [`followed_artists`] - Up to twenty followed artists
//! - [`pause`] / [`play`] - Playback control on the active device
//!
//! ### Monitoring
//!
//! - [`health`] - Status and version for load balancers
//!
//! ## Errors
//!
//! Protected endpoints answer failures with `{"error": "..."}` and a 500 status.
//! Playback control forwards Spotify's own error body and status when the Web
//! API refused the command. Without a configured refresh token they answer 503.

mod callback;
mod error;
mod followed_artists;
mod health;
mod login;
mod now_playing;
mod playback;
mod top_tracks;

pub use callback::callback;
pub use error::{ApiError, MISSING_REFRESH_TOKEN};
pub use followed_artists::{FOLLOWED_ARTISTS_LIMIT, followed_artists};
pub use health::health;
pub use login::login;
pub use now_playing::now_playing;
pub use playback::{pause, play};
pub use top_tracks::{TOP_TRACKS_LIMIT, top_tracks};

use axum::{
    Extension, Router,
    routing::{get, put},
};
use reqwest::Client;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::{
    Res, api,
    config::Config,
    info,
    spotify::{self, CredentialExchanger, SpotifyClient},
    warning,
};

/// Shared, read-only state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub exchanger: CredentialExchanger,
    pub spotify: SpotifyClient,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self::with_http(config, Client::new())
    }

    /// Builds the state around a caller-supplied HTTP client.
    pub fn with_http(config: Config, http: Client) -> Self {
        let (exchanger, refresher) = spotify::credentials(http.clone(), &config);
        let spotify = SpotifyClient::new(
            http,
            config.api_url.clone(),
            refresher,
            config.refresh_token.clone(),
        );

        Self {
            config: Arc::new(config),
            exchanger,
            spotify,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/spotify", get(api::now_playing))
        .route("/spotify/", get(api::now_playing))
        .route("/spotify/login", get(api::login))
        .route("/spotify/callback", get(api::callback))
        .route("/spotify/top-tracks", get(api::top_tracks))
        .route("/spotify/followed-artists", get(api::followed_artists))
        .route("/spotify/pause", put(api::pause))
        .route("/spotify/play/{track_id}", put(api::play))
        .layer(Extension(state))
}

/// Serves the proxy on an already bound listener until the process stops.
pub async fn serve(listener: TcpListener, state: AppState) -> Res<()> {
    axum::serve(listener, router(state)).await?;
    Ok(())
}

pub async fn start_api_server(config: Config) -> Res<()> {
    let addr = config.socket_addr()?;
    if config.refresh_token.is_none() {
        warning!("SPOTIFY_REFRESH_TOKEN is not set; only /spotify/login and /spotify/callback will work");
    }

    let listener = TcpListener::bind(&addr).await?;
    info!("Server running at http://{}", listener.local_addr()?);
    serve(listener, AppState::new(config)).await
}

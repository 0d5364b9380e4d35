use std::net::SocketAddr;

use tokio::net::TcpListener;

use crate::{config::Config, error, info, server, warning};

/// Runs the proxy and opens its login page so the operator can authorize the
/// application and copy the refresh token shown on the callback page.
pub async fn auth(config: Config) {
    let addr = match config.socket_addr() {
        Ok(addr) => addr,
        Err(e) => error!("Invalid server address: {}", e),
    };

    let listener = match TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => error!("Failed to bind {}: {}", addr, e),
    };

    let login_url = format!("http://{}/spotify/login", browser_host(addr));
    let state = server::AppState::new(config);
    let server = tokio::spawn(server::serve(listener, state));

    info!("Open {} to authorize the application", login_url);
    if webbrowser::open(&login_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            login_url
        )
    }

    match server.await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => error!("Server stopped: {}", e),
        Err(e) => error!("Server task failed: {}", e),
    }
}

/// Host a local browser can reach for a bind address.
fn browser_host(addr: SocketAddr) -> String {
    if addr.ip().is_unspecified() {
        format!("localhost:{}", addr.port())
    } else {
        addr.to_string()
    }
}

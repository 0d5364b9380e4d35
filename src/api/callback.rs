use std::collections::HashMap;

use axum::{Extension, extract::Query, http::StatusCode, response::Html};

use crate::{server::AppState, success, utils, warning};

pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(state): Extension<AppState>,
) -> (StatusCode, Html<String>) {
    if let Some(err) = params.get("error") {
        warning!("Authorization was not granted: {}", err);
        return (
            StatusCode::BAD_REQUEST,
            Html(format!(
                "<h4>Authorization failed: {}</h4>",
                utils::escape_html(err)
            )),
        );
    }

    let Some(code) = params.get("code").filter(|c| !c.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Html("<h4>Missing authorization code.</h4>".to_string()),
        );
    };

    match state.exchanger.exchange(code).await {
        Ok(pair) => {
            success!("Authorization code exchanged");
            (
                StatusCode::OK,
                Html(format!(
                    "<h3>Save this Refresh Token in your .env file:</h3>\n<pre>SPOTIFY_REFRESH_TOKEN={}</pre>",
                    utils::escape_html(&pair.refresh_token)
                )),
            )
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html("Failed to get access token".to_string()),
            )
        }
    }
}

use reqwest::{Client, StatusCode};
use serde_json::json;
use spotproxy::config::{ClientIdentity, Config};
use spotproxy::spotify::{
    CredentialExchanger, CredentialRefresher, UpstreamAuthError, credentials,
};
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BASIC: &str = "Basic Y2lkOnNlY3JldA==";
const FORM: &str = "application/x-www-form-urlencoded";

fn identity() -> ClientIdentity {
    ClientIdentity::new("cid", "secret", "https://app.example/callback")
}

fn config(server: &MockServer) -> Config {
    Config::new(identity()).with_token_url(format!("{}/api/token", server.uri()))
}

fn token_pair_json() -> serde_json::Value {
    json!({
        "access_token": "BQD-access",
        "token_type": "Bearer",
        "scope": "user-top-read",
        "expires_in": 3600,
        "refresh_token": "AQB-refresh"
    })
}

#[tokio::test]
async fn exchange_sends_exact_form_and_basic_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(header("authorization", BASIC))
        .and(header("content-type", FORM))
        .and(body_string(
            "grant_type=authorization_code&code=ABC123&redirect_uri=https%3A%2F%2Fapp.example%2Fcallback",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_pair_json()))
        .expect(1)
        .mount(&server)
        .await;

    let (exchanger, _) = credentials(Client::new(), &config(&server));
    let pair = exchanger.exchange("ABC123").await.expect("exchange");

    assert_eq!(pair.access_token, "BQD-access");
    assert_eq!(pair.refresh_token, "AQB-refresh");
    assert_eq!(pair.expires_in, 3600);
    assert_eq!(pair.token_type, "Bearer");
    assert_eq!(pair.scope.as_deref(), Some("user-top-read"));
}

#[tokio::test]
async fn exchange_rejected_code_fails_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Invalid authorization code"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (exchanger, _) = credentials(Client::new(), &config(&server));
    let err = exchanger.exchange("used-code").await.unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    match err {
        UpstreamAuthError::Rejected { body, .. } => {
            let body: serde_json::Value = serde_json::from_str(&body).unwrap();
            assert_eq!(body["error"], "invalid_grant");
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn exchange_reply_without_refresh_token_is_invalid() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "BQD-access",
            "token_type": "Bearer",
            "expires_in": 3600,
            "refresh_token": ""
        })))
        .mount(&server)
        .await;

    let (exchanger, _) = credentials(Client::new(), &config(&server));
    let err = exchanger.exchange("ABC123").await.unwrap_err();

    assert!(matches!(err, UpstreamAuthError::InvalidResponse(_)));
}

#[tokio::test]
async fn exchange_reply_that_is_not_json_is_invalid() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let exchanger = CredentialExchanger::new(
        Client::new(),
        format!("{}/api/token", server.uri()),
        identity(),
    );
    let err = exchanger.exchange("ABC123").await.unwrap_err();

    assert!(matches!(err, UpstreamAuthError::InvalidResponse(_)));
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn refresh_sends_exact_form_and_basic_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(header("authorization", BASIC))
        .and(header("content-type", FORM))
        .and(body_string("grant_type=refresh_token&refresh_token=rtok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "BQD-fresh",
            "token_type": "Bearer",
            "scope": "user-top-read",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (_, refresher) = credentials(Client::new(), &config(&server));
    let access = refresher.refresh("rtok").await.expect("refresh");

    assert_eq!(access, "BQD-fresh");
}

#[tokio::test]
async fn refresh_rejected_carries_upstream_body() {
    let upstream_body = r#"{"error":"invalid_grant","error_description":"Refresh token revoked"}"#;
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(400).set_body_string(upstream_body))
        .expect(1)
        .mount(&server)
        .await;

    let (_, refresher) = credentials(Client::new(), &config(&server));
    let err = refresher.refresh("rtok").await.unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    assert_eq!(err.body(), Some(upstream_body));
}

#[tokio::test]
async fn refresh_is_never_cached() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(body_string("grant_type=refresh_token&refresh_token=rtok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "BQD-fresh",
            "token_type": "Bearer",
            "expires_in": 3600
        })))
        .expect(2)
        .mount(&server)
        .await;

    let refresher = CredentialRefresher::new(
        Client::new(),
        format!("{}/api/token", server.uri()),
        identity(),
    );

    assert_eq!(refresher.refresh("rtok").await.unwrap(), "BQD-fresh");
    assert_eq!(refresher.refresh("rtok").await.unwrap(), "BQD-fresh");
}

#[tokio::test]
async fn refresh_reply_without_access_token_is_invalid() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token_type": "Bearer",
            "expires_in": 3600
        })))
        .mount(&server)
        .await;

    let (_, refresher) = credentials(Client::new(), &config(&server));
    let err = refresher.refresh("rtok").await.unwrap_err();

    assert!(matches!(err, UpstreamAuthError::InvalidResponse(_)));
}

#[tokio::test]
async fn refresh_transport_failure_is_reported() {
    // nothing listens on port 1
    let refresher =
        CredentialRefresher::new(Client::new(), "http://127.0.0.1:1/api/token", identity());
    let err = refresher.refresh("rtok").await.unwrap_err();

    assert!(matches!(err, UpstreamAuthError::Transport(_)));
    assert_eq!(err.body(), None);
}

#[tokio::test]
async fn concurrent_refreshes_are_independent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(header("authorization", BASIC))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "BQD-fresh",
            "token_type": "Bearer",
            "expires_in": 3600
        })))
        .expect(3)
        .mount(&server)
        .await;

    let (_, refresher) = credentials(Client::new(), &config(&server));
    let (a, b, c) = tokio::join!(
        refresher.refresh("rtok"),
        refresher.refresh("rtok"),
        refresher.refresh("rtok")
    );

    assert_eq!(a.unwrap(), "BQD-fresh");
    assert_eq!(b.unwrap(), "BQD-fresh");
    assert_eq!(c.unwrap(), "BQD-fresh");
}

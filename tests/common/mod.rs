// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use http_body_util::BodyExt;
use serde_json::json;
use std::sync::Arc;
use stravadash::config::Config;
use stravadash::routes::create_router;
use stravadash::AppState;
use tower::ServiceExt;
use wiremock::matchers::{body_string_contains, header as header_eq, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Access token handed out by the mocked token endpoint.
#[allow(dead_code)]
pub const ACCESS_TOKEN: &str = "XYZ";

/// Config pointing every Strava endpoint except the browser-facing
/// authorization page at the mock server.
#[allow(dead_code)]
pub fn test_config(strava: &MockServer) -> Config {
    Config {
        token_url: format!("{}/oauth/token", strava.uri()),
        deauthorize_url: format!("{}/oauth/deauthorize", strava.uri()),
        api_url: format!("{}/api/v3", strava.uri()),
        ..Config::default()
    }
}

/// Create a test app backed by an in-memory database and a mock Strava.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub async fn create_test_app(strava: &MockServer) -> (Router, Arc<AppState>) {
    let state = Arc::new(
        AppState::from_config(test_config(strava))
            .await
            .expect("Failed to build test state"),
    );

    (create_router(state.clone()), state)
}

#[allow(dead_code)]
pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

/// GET with an optional session cookie.
#[allow(dead_code)]
pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

/// Form POST with an optional session cookie.
#[allow(dead_code)]
pub fn post_form(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// `name=value` of the session cookie set by the response, if any.
#[allow(dead_code)]
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .find(|pair| pair.starts_with("id=") && pair.len() > "id=".len())
        .map(str::to_string)
}

#[allow(dead_code)]
pub fn location(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

#[allow(dead_code)]
pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Token endpoint accepting authorization code `ABC123`.
#[allow(dead_code)]
pub async fn mock_token_exchange(strava: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(body_string_contains("code=ABC123"))
        .and(body_string_contains("grant_type=authorization_code"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token_type": "Bearer",
            "access_token": ACCESS_TOKEN,
            "refresh_token": "refresh-XYZ",
            "expires_at": chrono::Utc::now().timestamp() + 6 * 3600,
            "athlete": { "id": 12345, "firstname": "Ada", "lastname": "Lovelace" }
        })))
        .mount(strava)
        .await;
}

/// Athlete endpoint answering `status` for the test access token.
#[allow(dead_code)]
pub async fn mock_athlete(strava: &MockServer, status: u16) {
    let template = if status == 200 {
        ResponseTemplate::new(200).set_body_json(json!({
            "id": 12345,
            "firstname": "Ada",
            "lastname": "Lovelace",
            "city": "London"
        }))
    } else {
        ResponseTemplate::new(status).set_body_json(json!({ "message": "Authorization Error" }))
    };

    Mock::given(method("GET"))
        .and(path("/api/v3/athlete"))
        .and(header_eq("authorization", "Bearer XYZ"))
        .respond_with(template)
        .mount(strava)
        .await;
}

/// Activity list endpoint returning `activities`.
#[allow(dead_code)]
pub async fn mock_activities(strava: &MockServer, activities: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/v3/athlete/activities"))
        .and(header_eq("authorization", "Bearer XYZ"))
        .respond_with(ResponseTemplate::new(200).set_body_json(activities))
        .mount(strava)
        .await;
}

/// Two activities on different days.
#[allow(dead_code)]
pub fn sample_activities() -> serde_json::Value {
    json!([
        {
            "id": 1001,
            "name": "New Year Run",
            "distance": 5000.0,
            "moving_time": 1800,
            "elapsed_time": 1900,
            "sport_type": "Run",
            "start_date": "2024-01-01T06:00:00Z",
            "start_latlng": [51.5, -0.12],
            "kudos_count": 4
        },
        {
            "id": 1002,
            "name": "Recovery Ride",
            "distance": 20000.0,
            "moving_time": 3600,
            "sport_type": "Ride",
            "start_date": "2024-01-02T06:00:00Z",
            "start_latlng": []
        }
    ])
}

/// Complete the OAuth callback with code `ABC123` and return the session
/// cookie. The token endpoint must already be mocked.
#[allow(dead_code)]
pub async fn sign_in(app: &Router) -> String {
    let response = send(app, get("/strava/auth?code=ABC123&scope=read", None)).await;
    assert_eq!(response.status(), 303);
    assert_eq!(location(&response), "/dashboard");
    session_cookie(&response).expect("callback should set a session cookie")
}

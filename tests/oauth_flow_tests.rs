// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! OAuth login and callback tests.
//!
//! These tests verify that:
//! 1. Anonymous `/login` redirects to the Strava authorization page
//! 2. A valid callback stores the token in the session and the activities
//!    in the database
//! 3. Failed or incomplete callbacks leave the user signed out

use chrono::NaiveDate;
use common::*;
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::json;
use stravadash::models::prelude::*;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;

#[tokio::test]
async fn test_login_redirects_to_strava() {
    let strava = MockServer::start().await;
    let (app, _) = create_test_app(&strava).await;

    let response = send(&app, get("/login", None)).await;

    assert_eq!(response.status(), 307);
    let location = location(&response);
    assert!(location.starts_with("https://www.strava.com/oauth/authorize?"));
    assert!(location.contains("client_id=test_client_id"));
    assert!(location.contains("redirect_uri=http%3A%2F%2Flocalhost%3A5000%2Fstrava%2Fauth"));
    assert!(location.contains("response_type=code"));
    assert!(location.contains("scope=activity:read_all,read_all"));
}

#[tokio::test]
async fn test_callback_signs_in_and_stores_activities() {
    let strava = MockServer::start().await;
    mock_token_exchange(&strava).await;
    mock_athlete(&strava, 200).await;
    mock_activities(&strava, sample_activities()).await;
    let (app, state) = create_test_app(&strava).await;

    let cookie = sign_in(&app).await;

    let stored = Activities::find().all(state.db.conn()).await.unwrap();
    assert_eq!(stored.len(), 2);
    let run = stored.iter().find(|a| a.strava_id == Some(1001)).unwrap();
    assert_eq!(run.name.as_deref(), Some("New Year Run"));
    assert_eq!(run.dist, 5000.0);
    assert_eq!(run.moving_time, 1800);
    assert_eq!(run.likes, 4);
    assert_eq!(run.start_latlng.as_deref(), Some("51.5,-0.12"));
    assert_eq!(SportTypes::find().count(state.db.conn()).await.unwrap(), 2);

    let response = send(&app, get("/dashboard", Some(&cookie))).await;
    assert_eq!(response.status(), 200);
    let body = body_string(response).await;
    assert!(body.contains("Ada"));
    assert!(body.contains("New Year Run"));
    assert!(body.contains("Recovery Ride"));
}

#[tokio::test]
async fn test_callback_form_post_records_single_activity() {
    let strava = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(body_string_contains("code=ABC123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access_token": "XYZ" })))
        .expect(1)
        .mount(&strava)
        .await;
    mock_activities(
        &strava,
        json!([{
            "name": "Morning Run",
            "distance": 5000,
            "moving_time": 1800,
            "start_date": "2024-01-01T06:00:00Z"
        }]),
    )
    .await;
    let (app, state) = create_test_app(&strava).await;

    let response = send(&app, post_form("/strava/auth", "code=ABC123", None)).await;

    assert_eq!(response.status(), 303);
    assert_eq!(location(&response), "/dashboard");
    assert!(session_cookie(&response).is_some());

    let stored = Activities::find().all(state.db.conn()).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].name.as_deref(), Some("Morning Run"));
    assert_eq!(stored[0].dist, 5000.0);
    assert_eq!(stored[0].moving_time, 1800);
    assert_eq!(
        stored[0].start_date,
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(6, 0, 0)
            .unwrap()
    );
    assert!(stored[0].strava_id.is_none());
    assert!(stored[0].sport_type_id.is_none());
}

#[tokio::test]
async fn test_callback_accepts_form_post() {
    let strava = MockServer::start().await;
    mock_token_exchange(&strava).await;
    let (app, _) = create_test_app(&strava).await;

    let response = send(&app, post_form("/strava/auth", "code=ABC123", None)).await;

    assert_eq!(response.status(), 303);
    assert_eq!(location(&response), "/dashboard");
    assert!(session_cookie(&response).is_some());
}

#[tokio::test]
async fn test_relogin_does_not_duplicate_activities() {
    let strava = MockServer::start().await;
    mock_token_exchange(&strava).await;
    mock_activities(&strava, sample_activities()).await;
    let (app, state) = create_test_app(&strava).await;

    sign_in(&app).await;
    sign_in(&app).await;

    assert_eq!(Activities::find().count(state.db.conn()).await.unwrap(), 2);
}

#[tokio::test]
async fn test_callback_survives_activity_fetch_failure() {
    let strava = MockServer::start().await;
    mock_token_exchange(&strava).await;
    mock_athlete(&strava, 200).await;
    Mock::given(method("GET"))
        .and(path("/api/v3/athlete/activities"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&strava)
        .await;
    let (app, state) = create_test_app(&strava).await;

    let cookie = sign_in(&app).await;

    assert_eq!(Activities::find().count(state.db.conn()).await.unwrap(), 0);
    let response = send(&app, get("/dashboard", Some(&cookie))).await;
    assert_eq!(response.status(), 200);
    assert!(body_string(response).await.contains("No activities"));
}

#[tokio::test]
async fn test_callback_skips_invalid_activities() {
    let strava = MockServer::start().await;
    mock_token_exchange(&strava).await;
    mock_activities(
        &strava,
        json!([
            { "id": 1, "name": "Good", "distance": 1000.0, "moving_time": 300, "start_date": "2024-01-01T06:00:00Z" },
            { "id": 2, "name": "No distance", "moving_time": 300, "start_date": "2024-01-01T07:00:00Z" },
            { "id": 3, "name": "Bad date", "distance": 1000.0, "moving_time": 300, "start_date": "yesterday" }
        ]),
    )
    .await;
    let (app, state) = create_test_app(&strava).await;

    sign_in(&app).await;

    let stored = Activities::find().all(state.db.conn()).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].name.as_deref(), Some("Good"));
}

#[tokio::test]
async fn test_callback_rejected_code() {
    let strava = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(400).set_body_string(r#"{"message":"Bad Request"}"#))
        .mount(&strava)
        .await;
    let (app, state) = create_test_app(&strava).await;

    let response = send(&app, get("/strava/auth?code=EXPIRED", None)).await;

    assert_eq!(response.status(), 401);
    assert!(session_cookie(&response).is_none());
    assert_eq!(
        body_string(response).await,
        "Failed to authenticate with Strava"
    );
    assert_eq!(Activities::find().count(state.db.conn()).await.unwrap(), 0);
}

#[tokio::test]
async fn test_callback_missing_code() {
    let strava = MockServer::start().await;
    let (app, _) = create_test_app(&strava).await;

    let response = send(&app, get("/strava/auth", None)).await;
    assert_eq!(response.status(), 400);

    let response = send(&app, get("/strava/auth?code=", None)).await;
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_callback_access_denied() {
    let strava = MockServer::start().await;
    let (app, _) = create_test_app(&strava).await;

    let response = send(&app, get("/strava/auth?error=access_denied", None)).await;

    assert_eq!(response.status(), 401);
    assert!(session_cookie(&response).is_none());
}

#[tokio::test]
async fn test_login_when_signed_in_goes_to_dashboard() {
    let strava = MockServer::start().await;
    mock_token_exchange(&strava).await;
    mock_athlete(&strava, 200).await;
    let (app, _) = create_test_app(&strava).await;

    let cookie = sign_in(&app).await;
    let response = send(&app, get("/login", Some(&cookie))).await;

    assert_eq!(response.status(), 303);
    assert_eq!(location(&response), "/dashboard");
}

#[tokio::test]
async fn test_login_with_revoked_token_restarts_oauth() {
    let strava = MockServer::start().await;
    mock_token_exchange(&strava).await;
    mock_athlete(&strava, 401).await;
    let (app, _) = create_test_app(&strava).await;

    let cookie = sign_in(&app).await;
    let response = send(&app, get("/login", Some(&cookie))).await;

    assert_eq!(response.status(), 307);
    assert!(location(&response).starts_with("https://www.strava.com/oauth/authorize"));
}

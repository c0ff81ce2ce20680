// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{http::StatusCode, response::IntoResponse};
use stravadash::error::AppError;

#[test]
fn test_is_strava_token_error_matches() {
    assert!(AppError::TokenRejected(401).is_strava_token_error());
    assert!(AppError::TokenRejected(403).is_strava_token_error());
    assert!(AppError::UpstreamAuth("Token refresh failed".to_string()).is_strava_token_error());
}

#[test]
fn test_is_strava_token_error_no_match() {
    assert!(!AppError::UpstreamApi("connection reset".to_string()).is_strava_token_error());
    assert!(!AppError::Revocation("HTTP 500".to_string()).is_strava_token_error());
    assert!(!AppError::Validation("Bad Request".to_string()).is_strava_token_error());
}

#[test]
fn test_status_mapping() {
    let cases = [
        (AppError::UpstreamAuth("denied".into()), StatusCode::UNAUTHORIZED),
        (AppError::TokenRejected(401), StatusCode::UNAUTHORIZED),
        (AppError::UpstreamApi("timeout".into()), StatusCode::BAD_GATEWAY),
        (AppError::Revocation("HTTP 500".into()), StatusCode::BAD_GATEWAY),
        (AppError::Validation("bad".into()), StatusCode::BAD_REQUEST),
        (AppError::Persistence("bad row".into()), StatusCode::INTERNAL_SERVER_ERROR),
        (AppError::Session("store".into()), StatusCode::INTERNAL_SERVER_ERROR),
        (
            AppError::Internal(anyhow::anyhow!("boom")),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    ];

    for (err, expected) in cases {
        let label = format!("{err:?}");
        assert_eq!(err.into_response().status(), expected, "{label}");
    }
}

#[test]
fn test_database_error_converts() {
    let err: AppError = sea_orm::DbErr::Custom("locked".to_string()).into();
    assert!(matches!(err, AppError::Database(_)));
    assert_eq!(
        err.into_response().status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent plain-text responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The token endpoint refused the grant, or the user denied access.
    #[error("Failed to authenticate with Strava: {0}")]
    UpstreamAuth(String),

    /// The profile probe came back non-2xx: the token is revoked or expired.
    #[error("Strava rejected the access token (HTTP {0})")]
    TokenRejected(u16),

    #[error("Strava API error: {0}")]
    UpstreamApi(String),

    #[error("Failed to revoke access token: {0}")]
    Revocation(String),

    #[error("{0}")]
    Validation(String),

    /// A fetched record could not be mapped onto the schema.
    #[error("Cannot store activity: {0}")]
    Persistence(String),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub const INVALID_DATE_FORMAT: &'static str =
        "Invalid date format. Please use DD-MM-YYYY format.";

    /// True when the upstream refused the user's credentials, meaning the
    /// session should be dropped rather than the request retried.
    pub fn is_strava_token_error(&self) -> bool {
        matches!(self, AppError::TokenRejected(_) | AppError::UpstreamAuth(_))
    }
}

impl From<tower_sessions::session::Error> for AppError {
    fn from(err: tower_sessions::session::Error) -> Self {
        AppError::Session(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::UpstreamAuth(msg) => {
                tracing::warn!(error = %msg, "Strava authentication failed");
                (
                    StatusCode::UNAUTHORIZED,
                    "Failed to authenticate with Strava".to_string(),
                )
            }
            AppError::TokenRejected(_) => (
                StatusCode::UNAUTHORIZED,
                "Strava access has been revoked or has expired".to_string(),
            ),
            AppError::UpstreamApi(msg) => {
                tracing::warn!(error = %msg, "Strava API error");
                (
                    StatusCode::BAD_GATEWAY,
                    "Failed to reach the Strava API".to_string(),
                )
            }
            AppError::Revocation(_) => (
                StatusCode::BAD_GATEWAY,
                "Failed to revoke access token".to_string(),
            ),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Persistence(msg) => {
                tracing::error!(error = %msg, "Persistence error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::Database(err) => {
                tracing::error!(error = %err, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::Session(msg) => {
                tracing::error!(error = %msg, "Session store error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, body).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;

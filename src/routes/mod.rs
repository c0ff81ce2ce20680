// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP route handlers.

pub mod auth;
pub mod dashboard;
pub mod views;

use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tower_sessions::cookie::SameSite;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};
use tracing::Level;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub build_id: String,
    pub database: String,
}

/// Health check response
async fn health_check(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthResponse>) {
    let build_id = option_env!("BUILD_ID").unwrap_or("unknown").to_string();

    let (status, database) = match state.db.ping().await {
        Ok(()) => (StatusCode::OK, "ok"),
        Err(e) => {
            tracing::error!(error = %e, "Database ping failed");
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        }
    };

    let body = HealthResponse {
        status: if status.is_success() { "ok" } else { "degraded" }.to_string(),
        build_id,
        database: database.to_string(),
    };
    (status, Json(body))
}

/// Build the complete router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    // Server-side sessions; the browser only ever holds the session ID.
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(state.config.session_secure)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            state.config.session_idle_minutes,
        )));

    Router::new()
        .route("/health", get(health_check))
        .merge(dashboard::routes())
        .merge(auth::routes())
        .layer(session_layer)
        .layer(middleware::from_fn(
            crate::middleware::security::add_security_headers,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

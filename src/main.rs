// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Stravadash server
//!
//! Signs athletes in with Strava, renders their activity dashboard, and
//! records fetched activities in the database.

use std::sync::Arc;
use stravadash::{config::Config, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = Config::from_env()?;
    tracing::info!(
        port = config.port,
        redirect_uri = %config.redirect_uri,
        "Starting Stravadash"
    );

    let state = Arc::new(AppState::from_config(config).await?);
    let port = state.config.port;

    let app = stravadash::routes::create_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Structured JSON logging; `RUST_LOG` overrides the default filter.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("stravadash=debug,info"));

    tracing_subscriber::registry().with(filter).with(format).init();
}

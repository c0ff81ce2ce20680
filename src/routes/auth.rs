// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava OAuth authentication routes.

use axum::{
    extract::{Query, State},
    response::Redirect,
    routing::get,
    Form, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::middleware::{Probe, SessionContext, SessionTokens};
use crate::services::strava::LOGIN_SCOPE;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/login", get(login))
        .route("/strava/auth", get(callback_query).post(callback_form))
        .route("/logout", get(logout))
}

/// Parameters Strava appends to the redirect URI. `state` and `scope` are
/// also sent and ignored.
#[derive(Debug, Default, Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    code: Option<String>,
    /// Set instead of `code` when the athlete denies access
    #[serde(default)]
    error: Option<String>,
}

/// Start OAuth flow - redirect to Strava authorization.
///
/// Already signed-in users with a working token go straight to the dashboard.
async fn login(State(state): State<Arc<AppState>>, mut ctx: SessionContext) -> Result<Redirect> {
    if let Probe::Valid { athlete, .. } = ctx.probe(&state.strava).await? {
        tracing::debug!(athlete_id = athlete.id, "Already signed in");
        return Ok(Redirect::to("/dashboard"));
    }

    let auth_url = state.strava.authorize_url(LOGIN_SCOPE);
    tracing::info!(
        client_id = %state.config.strava_client_id,
        "Starting OAuth flow, redirecting to Strava"
    );
    Ok(Redirect::temporary(&auth_url))
}

async fn callback_query(
    State(state): State<Arc<AppState>>,
    ctx: SessionContext,
    Query(params): Query<CallbackParams>,
) -> Result<Redirect> {
    complete_login(&state, ctx, params).await
}

async fn callback_form(
    State(state): State<Arc<AppState>>,
    ctx: SessionContext,
    Form(params): Form<CallbackParams>,
) -> Result<Redirect> {
    complete_login(&state, ctx, params).await
}

/// Exchange the code, record the athlete's activities, then sign in.
///
/// A failed exchange leaves the session empty. Problems fetching or storing
/// activities are logged and do not block the login.
async fn complete_login(
    state: &AppState,
    mut ctx: SessionContext,
    params: CallbackParams,
) -> Result<Redirect> {
    if let Some(error) = params.error {
        tracing::warn!(error = %error, "Strava authorization denied");
        ctx.logout().await?;
        return Err(AppError::UpstreamAuth(format!(
            "Authorization denied: {}",
            error
        )));
    }

    let code = params
        .code
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Missing authorization code".to_string()))?;

    tracing::info!("Exchanging authorization code for tokens");
    let token = match state.strava.exchange_code(&code).await {
        Ok(token) => token,
        Err(e) => {
            ctx.logout().await?;
            return Err(e);
        }
    };

    if let Some(athlete) = &token.athlete {
        tracing::info!(
            athlete_id = athlete.id,
            firstname = %athlete.firstname,
            "Token exchange successful"
        );
    }

    let activities = state.strava.get_activities(&token.access_token).await;
    let report = state.db.activities().ingest(&activities).await;
    if report.failed > 0 {
        tracing::warn!(failed = report.failed, "Some activities were not stored");
    }

    ctx.login(SessionTokens::from(token)).await?;
    Ok(Redirect::to("/dashboard"))
}

/// Revoke the token upstream and clear the session.
///
/// The session is cleared even when revocation fails, and logging out
/// twice is harmless.
async fn logout(State(state): State<Arc<AppState>>, mut ctx: SessionContext) -> Result<Redirect> {
    let previous = ctx.state();
    if let Some(access_token) = ctx.access_token() {
        if let Err(e) = state.strava.deauthorize(access_token).await {
            tracing::warn!(error = %e, "Strava revocation failed, clearing session anyway");
        }
    }

    ctx.logout().await?;
    tracing::info!(previous_state = ?previous, "User logged out");
    Ok(Redirect::to("/"))
}

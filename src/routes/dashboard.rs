// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Landing page and activity dashboard.

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::middleware::{Probe, SessionContext};
use crate::routes::views::{AccessRevokedPage, DashboardPage, HomePage, Html};
use crate::services::activity::apply_date_filter;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(home))
        .route("/dashboard", get(dashboard).post(filtered_dashboard))
}

#[derive(Debug, Default, Deserialize)]
pub struct DashboardForm {
    /// `DD-MM-YYYY`; blank shows everything
    #[serde(default)]
    start_date: Option<String>,
}

/// Landing page, or the dashboard for users whose token still works.
async fn home(State(state): State<Arc<AppState>>, mut ctx: SessionContext) -> Result<Response> {
    match ctx.probe(&state.strava).await {
        Ok(Probe::Valid { .. }) => Ok(Redirect::to("/dashboard").into_response()),
        Ok(_) => Ok(Html(HomePage).into_response()),
        Err(AppError::UpstreamApi(e)) => {
            tracing::warn!(error = %e, "Profile check failed, showing landing page");
            Ok(Html(HomePage).into_response())
        }
        Err(e) => Err(e),
    }
}

async fn dashboard(State(state): State<Arc<AppState>>, ctx: SessionContext) -> Result<Response> {
    render_dashboard(&state, ctx, None).await
}

async fn filtered_dashboard(
    State(state): State<Arc<AppState>>,
    ctx: SessionContext,
    Form(form): Form<DashboardForm>,
) -> Result<Response> {
    render_dashboard(&state, ctx, form.start_date).await
}

async fn render_dashboard(
    state: &AppState,
    mut ctx: SessionContext,
    start_date: Option<String>,
) -> Result<Response> {
    let (access_token, athlete) = match ctx.probe(&state.strava).await? {
        Probe::Anonymous => return Ok(Redirect::to("/login").into_response()),
        Probe::Revoked => return Ok(Html(AccessRevokedPage).into_response()),
        Probe::Valid {
            access_token,
            athlete,
        } => (access_token, athlete),
    };

    let activities = state.strava.get_activities(&access_token).await;
    let activities = apply_date_filter(activities, start_date.as_deref())?;
    tracing::debug!(
        athlete_id = athlete.id,
        count = activities.len(),
        "Rendering dashboard"
    );

    let page = DashboardPage::new(athlete.firstname, &activities, start_date.unwrap_or_default());
    Ok(Html(page).into_response())
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTML pages.

use crate::services::strava::StravaActivitySummary;
use crate::time_utils::{format_activity_datetime, format_distance_km, format_precise_duration};
use askama::Template;
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

/// Renders an askama template as `text/html`.
pub struct Html<T: Template>(pub T);

impl<T: Template> IntoResponse for Html<T> {
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(body) => (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
                body,
            )
                .into_response(),
            Err(e) => {
                tracing::error!(error = %e, "Template render error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
            }
        }
    }
}

#[derive(Template)]
#[template(path = "pages/home.html")]
pub struct HomePage;

#[derive(Template)]
#[template(path = "pages/dashboard.html")]
pub struct DashboardPage {
    pub user_name: String,
    pub activities: Vec<ActivityRow>,
    /// Echo of the submitted filter, empty when none
    pub start_date: String,
}

impl DashboardPage {
    pub fn new(user_name: String, activities: &[StravaActivitySummary], start_date: String) -> Self {
        Self {
            user_name,
            activities: activities.iter().map(ActivityRow::from).collect(),
            start_date,
        }
    }
}

#[derive(Template)]
#[template(path = "pages/access_revoked.html")]
pub struct AccessRevokedPage;

/// One dashboard table row, already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityRow {
    pub name: String,
    pub sport_type: String,
    pub started: String,
    pub distance: String,
    pub moving_time: String,
}

impl From<&StravaActivitySummary> for ActivityRow {
    fn from(a: &StravaActivitySummary) -> Self {
        Self {
            name: a.name.clone().unwrap_or_else(|| "Untitled".to_string()),
            sport_type: a.sport_type.clone().unwrap_or_default(),
            started: format_activity_datetime(&a.start_date),
            distance: a.distance.map(format_distance_km).unwrap_or_default(),
            moving_time: a.moving_time.map(format_precise_duration).unwrap_or_default(),
        }
    }
}

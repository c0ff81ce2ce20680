// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava API client.
//!
//! Handles:
//! - Building the OAuth authorization URL
//! - Authorization-code exchange, refresh, and deauthorization
//! - Athlete profile and activity list fetches

use crate::config::Config;
use crate::error::AppError;
use serde::{Deserialize, Serialize};

/// Scope requested at login: read every activity, including private ones.
pub const LOGIN_SCOPE: &str = "activity:read_all,read_all";

/// Strava API client.
#[derive(Clone)]
pub struct StravaClient {
    http: reqwest::Client,
    auth_url: String,
    token_url: String,
    deauthorize_url: String,
    api_url: String,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
}

impl StravaClient {
    /// Create a client from configuration. Every request is bounded by
    /// `config.http_timeout`.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("HTTP client init failed: {}", e)))?;

        Ok(Self {
            http,
            auth_url: config.auth_url.clone(),
            token_url: config.token_url.clone(),
            deauthorize_url: config.deauthorize_url.clone(),
            api_url: config.api_url.clone(),
            client_id: config.strava_client_id.clone(),
            client_secret: config.strava_client_secret.clone(),
            redirect_uri: config.redirect_uri.clone(),
        })
    }

    /// Authorization page URL for the given scope.
    pub fn authorize_url(&self, scope: &str) -> String {
        format!(
            "{}?client_id={}&redirect_uri={}&response_type=code&scope={}",
            self.auth_url,
            self.client_id,
            urlencoding::encode(&self.redirect_uri),
            scope
        )
    }

    /// Exchange an authorization code for tokens.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenResponse, AppError> {
        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("code", code),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| AppError::UpstreamAuth(format!("Token exchange request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "Strava token exchange failed");
            return Err(AppError::UpstreamAuth(format!(
                "Token exchange failed with status {}",
                status
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::UpstreamAuth(format!("Failed to parse token response: {}", e)))
    }

    /// Trade a refresh token for a new access token.
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<TokenResponse, AppError> {
        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("refresh_token", refresh_token),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await
            .map_err(|e| AppError::UpstreamAuth(format!("Token refresh request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::warn!(status = %status, "Strava token refresh failed");
            return Err(AppError::UpstreamAuth(format!(
                "Token refresh failed with status {}",
                status
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::UpstreamAuth(format!("Failed to parse refresh response: {}", e)))
    }

    /// Deauthorize the application for a user.
    ///
    /// This invalidates all access and refresh tokens for the user
    /// and removes the app from their Strava settings.
    pub async fn deauthorize(&self, access_token: &str) -> Result<(), AppError> {
        let response = self
            .http
            .post(&self.deauthorize_url)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("access_token", access_token),
            ])
            .send()
            .await
            .map_err(|e| AppError::Revocation(format!("Deauthorization request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Revocation(format!("HTTP {}", response.status())));
        }

        tracing::info!("Strava deauthorization successful");
        Ok(())
    }

    /// Get the authenticated athlete profile.
    ///
    /// Any non-2xx status means the token is no longer usable.
    pub async fn get_athlete(&self, access_token: &str) -> Result<StravaAthlete, AppError> {
        let url = format!("{}/athlete", self.api_url);
        let response = self.get(&url, access_token).await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            tracing::info!(status, "Strava rejected athlete profile request");
            return Err(AppError::TokenRejected(status));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::UpstreamApi(format!("JSON parse error: {}", e)))
    }

    /// List the athlete's recent activities.
    pub async fn list_activities(
        &self,
        access_token: &str,
    ) -> Result<Vec<StravaActivitySummary>, AppError> {
        let url = format!("{}/athlete/activities", self.api_url);
        let response = self.get(&url, access_token).await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::UpstreamApi(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::UpstreamApi(format!("JSON parse error: {}", e)))
    }

    /// List activities, treating any failure as "no activities".
    pub async fn get_activities(&self, access_token: &str) -> Vec<StravaActivitySummary> {
        match self.list_activities(access_token).await {
            Ok(activities) => activities,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch activities, showing none");
                Vec::new()
            }
        }
    }

    async fn get(&self, url: &str, access_token: &str) -> Result<reqwest::Response, AppError> {
        self.http
            .get(url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::UpstreamApi(e.to_string()))
    }
}

/// Token endpoint response (code exchange or refresh).
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Unix timestamp
    #[serde(default)]
    pub expires_at: Option<i64>,
    /// Present on code exchange only
    #[serde(default)]
    pub athlete: Option<StravaAthlete>,
}

/// Athlete profile.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StravaAthlete {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub profile: Option<String>,
}

/// Summary activity from the list endpoint.
///
/// Every field is optional upstream; missing values default rather than
/// failing the whole list.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StravaActivitySummary {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub distance: Option<f64>,
    pub moving_time: Option<i64>,
    pub elapsed_time: Option<i64>,
    pub total_elevation_gain: Option<f64>,
    pub elev_high: Option<f64>,
    pub elev_low: Option<f64>,
    pub sport_type: Option<String>,
    /// UTC, `YYYY-MM-DDTHH:MM:SSZ`
    pub start_date: String,
    pub start_date_local: Option<String>,
    pub timezone: Option<String>,
    pub start_latlng: Option<Vec<f64>>,
    pub end_latlng: Option<Vec<f64>>,
    pub average_speed: Option<f64>,
    pub max_speed: Option<f64>,
    pub private: Option<bool>,
    pub kudos_count: Option<i64>,
}

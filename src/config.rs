// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honoured for local development.

use std::env;
use std::time::Duration;

/// Strava OAuth authorization page.
pub const STRAVA_AUTH_URL: &str = "https://www.strava.com/oauth/authorize";
/// Strava OAuth token endpoint (code exchange and refresh).
pub const STRAVA_TOKEN_URL: &str = "https://www.strava.com/oauth/token";
/// Strava OAuth deauthorization endpoint.
pub const STRAVA_DEAUTHORIZE_URL: &str = "https://www.strava.com/oauth/deauthorize";
/// Strava REST API base.
pub const STRAVA_API_URL: &str = "https://www.strava.com/api/v3";

const DEFAULT_REDIRECT_URI: &str = "http://localhost:5000/strava/auth";
const DEFAULT_DATABASE_URL: &str = "sqlite://stravadash.db?mode=rwc";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
/// 31 days, the lifetime of a permanent browser session.
const DEFAULT_SESSION_IDLE_MINUTES: i64 = 31 * 24 * 60;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Strava OAuth client ID (public)
    pub strava_client_id: String,
    /// Strava OAuth client secret
    pub strava_client_secret: String,
    /// Callback URL registered with Strava
    pub redirect_uri: String,

    pub auth_url: String,
    pub token_url: String,
    pub deauthorize_url: String,
    pub api_url: String,

    /// sea-orm connection string
    pub database_url: String,
    /// Server port
    pub port: u16,
    /// Upper bound on every upstream HTTP call
    pub http_timeout: Duration,

    /// Mark the session cookie `Secure` (HTTPS deployments)
    pub session_secure: bool,
    /// Session expiry after this many minutes of inactivity
    pub session_idle_minutes: i64,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            strava_client_id: "test_client_id".to_string(),
            strava_client_secret: "test_secret".to_string(),
            redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
            auth_url: STRAVA_AUTH_URL.to_string(),
            token_url: STRAVA_TOKEN_URL.to_string(),
            deauthorize_url: STRAVA_DEAUTHORIZE_URL.to_string(),
            api_url: STRAVA_API_URL.to_string(),
            database_url: "sqlite::memory:".to_string(),
            port: DEFAULT_PORT,
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            session_secure: false,
            session_idle_minutes: DEFAULT_SESSION_IDLE_MINUTES,
        }
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// `STRAVA_CLIENT_ID` / `STRAVA_CLIENT_SECRET` fall back to the shorter
    /// `CLIENT_ID` / `CLIENT_SECRET` names.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let strava_client_id = var("STRAVA_CLIENT_ID")
            .or_else(|| var("CLIENT_ID"))
            .ok_or(ConfigError::Missing("STRAVA_CLIENT_ID"))?;
        let strava_client_secret = var("STRAVA_CLIENT_SECRET")
            .or_else(|| var("CLIENT_SECRET"))
            .ok_or(ConfigError::Missing("STRAVA_CLIENT_SECRET"))?;

        Ok(Self {
            strava_client_id,
            strava_client_secret,
            redirect_uri: var("REDIRECT_URI").unwrap_or_else(|| DEFAULT_REDIRECT_URI.to_string()),
            auth_url: var("STRAVA_AUTH_URL").unwrap_or_else(|| STRAVA_AUTH_URL.to_string()),
            token_url: var("STRAVA_TOKEN_URL").unwrap_or_else(|| STRAVA_TOKEN_URL.to_string()),
            deauthorize_url: var("STRAVA_DEAUTHORIZE_URL")
                .unwrap_or_else(|| STRAVA_DEAUTHORIZE_URL.to_string()),
            api_url: var("STRAVA_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| STRAVA_API_URL.to_string()),
            database_url: var("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            port: parse_or("PORT", var("PORT"), DEFAULT_PORT)?,
            http_timeout: Duration::from_secs(parse_or(
                "HTTP_TIMEOUT_SECS",
                var("HTTP_TIMEOUT_SECS"),
                DEFAULT_HTTP_TIMEOUT_SECS,
            )?),
            session_secure: parse_or("SESSION_SECURE", var("SESSION_SECURE"), false)?,
            session_idle_minutes: parse_or(
                "SESSION_IDLE_MINUTES",
                var("SESSION_IDLE_MINUTES"),
                DEFAULT_SESSION_IDLE_MINUTES,
            )?,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    key: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid(key, raw)),
        None => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}

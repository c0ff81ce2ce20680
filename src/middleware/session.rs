// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-request login context backed by the server-side session.
//!
//! Handlers receive a [`SessionContext`] and hand the bare access token to
//! the Strava client; nothing reads the session store behind their back.

use crate::error::{AppError, Result};
use crate::services::strava::{StravaAthlete, StravaClient, TokenResponse};
use axum::{extract::FromRequestParts, http::request::Parts};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

/// Session key holding [`SessionTokens`].
const TOKENS_KEY: &str = "strava_tokens";

/// Refresh this long before the access token's recorded expiry (5 minutes).
const TOKEN_REFRESH_MARGIN_SECS: i64 = 5 * 60;

/// Tokens kept for the lifetime of a browser session. Never persisted to the
/// database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: Option<String>,
    /// Unix timestamp, when Strava reported one
    pub expires_at: Option<i64>,
}

impl SessionTokens {
    /// True when the token is known to expire within the refresh margin.
    pub fn needs_refresh(&self, now: i64) -> bool {
        self.expires_at
            .is_some_and(|expires_at| now + TOKEN_REFRESH_MARGIN_SECS >= expires_at)
    }
}

impl From<TokenResponse> for SessionTokens {
    fn from(token: TokenResponse) -> Self {
        Self {
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            expires_at: token.expires_at,
        }
    }
}

/// Where the browser stands in the login flow, as far as the server knows.
///
/// The pending state (user at the Strava authorization page) holds no
/// server-side data and looks `Anonymous` from here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Anonymous,
    Authenticated,
}

/// Outcome of checking the session's token against the athlete endpoint.
#[derive(Debug)]
pub enum Probe {
    /// No token in the session
    Anonymous,
    /// The session held a token Strava no longer accepts; it has been cleared
    Revoked,
    Valid {
        access_token: String,
        athlete: StravaAthlete,
    },
}

/// Login state for the current request.
pub struct SessionContext {
    session: Session,
    tokens: Option<SessionTokens>,
}

impl<S> FromRequestParts<S> for SessionContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| AppError::Session(msg.to_string()))?;
        let tokens = session.get::<SessionTokens>(TOKENS_KEY).await?;

        Ok(Self { session, tokens })
    }
}

impl SessionContext {
    pub fn state(&self) -> AuthState {
        match self.tokens {
            Some(_) => AuthState::Authenticated,
            None => AuthState::Anonymous,
        }
    }

    pub fn access_token(&self) -> Option<&str> {
        self.tokens.as_ref().map(|t| t.access_token.as_str())
    }

    /// Store freshly issued tokens under a new session ID.
    pub async fn login(&mut self, tokens: SessionTokens) -> Result<()> {
        self.session.cycle_id().await?;
        self.session.insert(TOKENS_KEY, &tokens).await?;
        self.tokens = Some(tokens);
        Ok(())
    }

    /// Drop all session data. Safe to call on an empty session.
    pub async fn logout(&mut self) -> Result<()> {
        self.tokens = None;
        self.session.flush().await?;
        Ok(())
    }

    /// Current access token, refreshed first if it is about to expire.
    ///
    /// A failed refresh ends the session and yields `None`.
    pub async fn fresh_access_token(&mut self, strava: &StravaClient) -> Result<Option<String>> {
        let Some(tokens) = self.tokens.clone() else {
            return Ok(None);
        };

        let now = chrono::Utc::now().timestamp();
        let refresh_token = match tokens.refresh_token.as_deref() {
            Some(rt) if tokens.needs_refresh(now) => rt,
            _ => return Ok(Some(tokens.access_token)),
        };

        tracing::info!("Access token expiring, refreshing");
        match strava.refresh_token(refresh_token).await {
            Ok(response) => {
                let mut renewed = SessionTokens::from(response);
                if renewed.refresh_token.is_none() {
                    renewed.refresh_token = tokens.refresh_token.clone();
                }
                let access_token = renewed.access_token.clone();
                self.session.insert(TOKENS_KEY, &renewed).await?;
                self.tokens = Some(renewed);
                Ok(Some(access_token))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Token refresh failed, ending session");
                self.logout().await?;
                Ok(None)
            }
        }
    }
}

impl SessionContext {
    /// Verify the session's token with a profile fetch.
    ///
    /// Any non-2xx answer clears the session (`Authenticated` → `Anonymous`).
    /// Transport failures are returned as errors and leave the session alone.
    pub async fn probe(&mut self, strava: &StravaClient) -> Result<Probe> {
        let had_tokens = self.tokens.is_some();
        let Some(access_token) = self.fresh_access_token(strava).await? else {
            return Ok(if had_tokens {
                Probe::Revoked
            } else {
                Probe::Anonymous
            });
        };

        match strava.get_athlete(&access_token).await {
            Ok(athlete) => Ok(Probe::Valid {
                access_token,
                athlete,
            }),
            Err(e) if e.is_strava_token_error() => {
                tracing::info!(error = %e, "Access token no longer valid, ending session");
                self.logout().await?;
                Ok(Probe::Revoked)
            }
            Err(e) => Err(e),
        }
    }
}

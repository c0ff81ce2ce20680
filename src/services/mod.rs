// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - upstream client and activity helpers.

pub mod activity;
pub mod strava;

pub use strava::{StravaActivitySummary, StravaAthlete, StravaClient, TokenResponse};

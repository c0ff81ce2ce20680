// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Stravadash: a Strava-connected activity dashboard
//!
//! This crate provides the web app that signs athletes in through Strava
//! OAuth, shows their recent activities, and keeps a copy of every fetched
//! activity in a relational store.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::Db;
use error::AppError;
use services::StravaClient;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Db,
    pub strava: StravaClient,
}

impl AppState {
    /// Connect the database (running migrations) and build the Strava client.
    pub async fn from_config(config: Config) -> Result<Self, AppError> {
        let db = Db::connect(&config.database_url).await?;
        let strava = StravaClient::new(&config)?;

        Ok(Self { config, db, strava })
    }
}

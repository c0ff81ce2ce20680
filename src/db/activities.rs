// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity persistence.
//!
//! Every activity is written in its own transaction. A failure rolls back
//! that activity only; the rest of a batch is still attempted.

use crate::error::{AppError, Result};
use crate::models::prelude::*;
use crate::models::{activity, sport_type};
use crate::services::strava::StravaActivitySummary;
use crate::time_utils::parse_strava_timestamp;
use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, Set, TransactionTrait,
};

/// Activity data as received from upstream, before validation.
#[derive(Debug, Clone, Default)]
pub struct NewActivity {
    pub strava_id: Option<i64>,
    pub name: Option<String>,
    /// Meters; required
    pub distance: Option<f64>,
    /// Seconds; required
    pub moving_time: Option<i64>,
    /// `YYYY-MM-DDTHH:MM:SSZ`; required
    pub start_date: String,
    pub elapsed_time: Option<i64>,
    pub total_elevation_gain: Option<f64>,
    pub elevation_high: Option<f64>,
    pub elevation_low: Option<f64>,
    pub sport_type: Option<String>,
    pub start_date_local: Option<String>,
    pub timezone: Option<String>,
    pub start_latlng: Option<Vec<f64>>,
    pub end_latlng: Option<Vec<f64>>,
    pub avg_speed: Option<f64>,
    pub max_speed: Option<f64>,
    pub private: bool,
    pub likes: i64,
}

impl NewActivity {
    pub fn new(name: &str, distance: f64, moving_time: i64, start_date: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            distance: Some(distance),
            moving_time: Some(moving_time),
            start_date: start_date.to_string(),
            ..Default::default()
        }
    }
}

impl From<&StravaActivitySummary> for NewActivity {
    fn from(s: &StravaActivitySummary) -> Self {
        Self {
            strava_id: s.id,
            name: s.name.clone(),
            distance: s.distance,
            moving_time: s.moving_time,
            start_date: s.start_date.clone(),
            elapsed_time: s.elapsed_time,
            total_elevation_gain: s.total_elevation_gain,
            elevation_high: s.elev_high,
            elevation_low: s.elev_low,
            sport_type: s.sport_type.clone(),
            start_date_local: s.start_date_local.clone(),
            timezone: s.timezone.clone(),
            start_latlng: s.start_latlng.clone(),
            end_latlng: s.end_latlng.clone(),
            avg_speed: s.average_speed,
            max_speed: s.max_speed,
            private: s.private.unwrap_or(false),
            likes: s.kudos_count.unwrap_or(0),
        }
    }
}

/// Result of recording one activity.
#[derive(Debug)]
pub enum RecordOutcome {
    Stored(activity::Model),
    /// An activity with the same Strava ID is already in the database.
    AlreadyStored,
}

/// Tally of a batch ingestion.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IngestReport {
    pub stored: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Required columns after validation.
struct Validated {
    start_date: NaiveDateTime,
    start_date_local: Option<NaiveDateTime>,
    distance: f64,
    moving_time: i32,
    elapsed_time: Option<i32>,
    likes: i32,
}

pub struct ActivityStore {
    conn: DatabaseConnection,
}

impl ActivityStore {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Record a single activity from its four core fields.
    pub async fn record(
        &self,
        name: &str,
        distance: f64,
        moving_time: i64,
        start_date: &str,
    ) -> Result<activity::Model> {
        let new = NewActivity::new(name, distance, moving_time, start_date);
        match self.record_activity(&new).await? {
            RecordOutcome::Stored(model) => Ok(model),
            RecordOutcome::AlreadyStored => Err(AppError::Persistence(
                "activity is already stored".to_string(),
            )),
        }
    }

    /// Validate and insert one activity, resolving its sport type, inside a
    /// single transaction.
    pub async fn record_activity(&self, new: &NewActivity) -> Result<RecordOutcome> {
        let validated = validate(new)?;

        let txn = self.conn.begin().await?;
        match write(&txn, new, &validated).await {
            Ok(outcome) => {
                txn.commit().await?;
                Ok(outcome)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!(error = %rollback_err, "Rollback failed");
                }
                Err(e.into())
            }
        }
    }

    /// Record a fetched batch. Failures are logged and counted, never returned.
    pub async fn ingest(&self, activities: &[StravaActivitySummary]) -> IngestReport {
        let mut report = IngestReport::default();

        for summary in activities {
            let new = NewActivity::from(summary);
            match self.record_activity(&new).await {
                Ok(RecordOutcome::Stored(model)) => {
                    report.stored += 1;
                    tracing::debug!(id = model.id, strava_id = ?model.strava_id, "Activity stored");
                }
                Ok(RecordOutcome::AlreadyStored) => {
                    report.skipped += 1;
                    tracing::debug!(strava_id = ?new.strava_id, "Activity already stored (idempotent skip)");
                }
                Err(e) => {
                    report.failed += 1;
                    tracing::warn!(
                        error = %e,
                        name = ?new.name,
                        start_date = %new.start_date,
                        "Failed to store activity, rolled back"
                    );
                }
            }
        }

        tracing::info!(
            stored = report.stored,
            skipped = report.skipped,
            failed = report.failed,
            "Activity ingestion finished"
        );
        report
    }
}

fn validate(new: &NewActivity) -> Result<Validated> {
    let start_date = parse_strava_timestamp(&new.start_date).map_err(|e| {
        AppError::Persistence(format!("invalid start_date {:?}: {}", new.start_date, e))
    })?;
    let distance = new
        .distance
        .ok_or_else(|| AppError::Persistence("missing distance".to_string()))?;
    let moving_time = new
        .moving_time
        .ok_or_else(|| AppError::Persistence("missing moving_time".to_string()))
        .and_then(|secs| to_i32("moving_time", secs))?;
    let elapsed_time = new
        .elapsed_time
        .map(|secs| to_i32("elapsed_time", secs))
        .transpose()?;
    let start_date_local = new
        .start_date_local
        .as_deref()
        .and_then(|s| parse_strava_timestamp(s).ok());

    Ok(Validated {
        start_date,
        start_date_local,
        distance,
        moving_time,
        elapsed_time,
        likes: to_i32("likes", new.likes)?,
    })
}

fn to_i32(field: &str, value: i64) -> Result<i32> {
    i32::try_from(value).map_err(|_| AppError::Persistence(format!("{} out of range: {}", field, value)))
}

/// `[lat, lng]` → `"lat,lng"`. Strava sends `[]` for activities without GPS.
fn latlng(point: &Option<Vec<f64>>) -> Option<String> {
    match point.as_deref() {
        Some([lat, lng]) => Some(format!("{},{}", lat, lng)),
        _ => None,
    }
}

async fn write(
    txn: &DatabaseTransaction,
    new: &NewActivity,
    v: &Validated,
) -> std::result::Result<RecordOutcome, DbErr> {
    if let Some(strava_id) = new.strava_id {
        let existing = Activities::find()
            .filter(activity::Column::StravaId.eq(strava_id))
            .one(txn)
            .await?;
        if existing.is_some() {
            return Ok(RecordOutcome::AlreadyStored);
        }
    }

    let sport_type_id = match new.sport_type.as_deref() {
        Some(name) => Some(resolve_sport_type(txn, name).await?),
        None => None,
    };

    let model = activity::ActiveModel {
        strava_id: Set(new.strava_id),
        name: Set(new.name.clone()),
        dist: Set(v.distance),
        moving_time: Set(v.moving_time),
        elapsed_time: Set(v.elapsed_time),
        total_elevation_gain: Set(new.total_elevation_gain),
        elevation_high: Set(new.elevation_high),
        elevation_low: Set(new.elevation_low),
        sport_type_id: Set(sport_type_id),
        start_date: Set(v.start_date),
        start_date_local: Set(v.start_date_local),
        timezone: Set(new.timezone.clone()),
        start_latlng: Set(latlng(&new.start_latlng)),
        end_latlng: Set(latlng(&new.end_latlng)),
        avg_speed: Set(new.avg_speed),
        max_speed: Set(new.max_speed),
        private: Set(new.private),
        likes: Set(v.likes),
        ..Default::default()
    }
    .insert(txn)
    .await?;

    Ok(RecordOutcome::Stored(model))
}

/// Look up a sport type by name, creating it on first sight.
async fn resolve_sport_type(txn: &DatabaseTransaction, name: &str) -> std::result::Result<i32, DbErr> {
    if let Some(existing) = SportTypes::find()
        .filter(sport_type::Column::Name.eq(name))
        .one(txn)
        .await?
    {
        return Ok(existing.id);
    }

    let created = sport_type::ActiveModel {
        name: Set(name.to_string()),
        ..Default::default()
    }
    .insert(txn)
    .await?;

    Ok(created.id)
}

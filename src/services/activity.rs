// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client-side activity filtering for the dashboard.

use crate::error::{AppError, Result};
use crate::services::strava::StravaActivitySummary;
use crate::time_utils::format_iso_date;
use chrono::NaiveDate;

/// Layout of the dashboard's date filter field.
pub const FILTER_DATE_FORMAT: &str = "%d-%m-%Y";

/// Parse a `DD-MM-YYYY` filter value.
///
/// Blank input means "no filter" and yields `Ok(None)`.
pub fn parse_filter_date(input: &str) -> Result<Option<NaiveDate>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    NaiveDate::parse_from_str(input, FILTER_DATE_FORMAT)
        .map(Some)
        .map_err(|_| AppError::Validation(AppError::INVALID_DATE_FORMAT.to_string()))
}

/// Keep the activities whose UTC start date falls on `date`.
///
/// Compares the first ten characters of `start_date` (the date portion of
/// the ISO-8601 timestamp) against `YYYY-MM-DD`.
pub fn filter_by_start_date(
    activities: Vec<StravaActivitySummary>,
    date: NaiveDate,
) -> Vec<StravaActivitySummary> {
    let wanted = format_iso_date(date);
    activities
        .into_iter()
        .filter(|a| a.start_date.get(..10) == Some(wanted.as_str()))
        .collect()
}

/// Apply the raw form value to a fetched list.
pub fn apply_date_filter(
    activities: Vec<StravaActivitySummary>,
    raw: Option<&str>,
) -> Result<Vec<StravaActivitySummary>> {
    match parse_filter_date(raw.unwrap_or_default())? {
        Some(date) => Ok(filter_by_start_date(activities, date)),
        None => Ok(activities),
    }
}

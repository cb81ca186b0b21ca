//! Workout input rules shared by the create/replace endpoints.

pub mod sets;

use crate::error::IronlogError;
use chrono::NaiveDate;
use ironlog_schema::{SetInput, WorkoutInput, WorkoutSource};

pub use sets::{assign_set_numbers, next_set_number, remove_and_renumber};

/// Rejects inputs the store must never hold: `end < start`, blank ids and negative measures.
pub fn validate_workout_input(input: &WorkoutInput) -> Result<(), IronlogError> {
    if input.end_time.is_some_and(|end| end < input.start_time) {
        return Err(IronlogError::Validation(
            "endTime must not be earlier than startTime".to_string(),
        ));
    }

    if input
        .external_id
        .as_deref()
        .is_some_and(|id| id.trim().is_empty())
    {
        return Err(IronlogError::Validation(
            "externalId must not be blank".to_string(),
        ));
    }

    if input.source == WorkoutSource::ExternalSync && input.external_id.is_none() {
        return Err(IronlogError::Validation(
            "synced workouts need an externalId".to_string(),
        ));
    }

    for (idx, set) in input.sets.iter().enumerate() {
        validate_set_input(set)
            .map_err(|msg| IronlogError::Validation(format!("sets[{idx}]: {msg}")))?;
    }

    Ok(())
}

/// Checks one set on its own; the message names the offending field.
pub fn validate_set_input(set: &SetInput) -> Result<(), String> {
    if set.exercise_id.trim().is_empty() {
        return Err("exerciseId must not be blank".to_string());
    }
    let bad_float = |v: f64| v < 0.0 || !v.is_finite();
    if set.reps.is_some_and(|v| v < 0) || set.duration.is_some_and(|v| v < 0) {
        return Err("reps and duration must not be negative".to_string());
    }
    if set.weight.is_some_and(bad_float)
        || set.distance.is_some_and(bad_float)
        || set.calories.is_some_and(bad_float)
    {
        return Err("weight, distance and calories must be finite and not negative".to_string());
    }
    Ok(())
}

/// Parses an inclusive date bound given as `YYYY-MM-DD` or an RFC 3339 timestamp (UTC date).
pub fn parse_date_bound(field: &str, raw: &str) -> Result<NaiveDate, IronlogError> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&chrono::Utc).date_naive())
        .map_err(|_| IronlogError::Validation(format!("{field}: malformed date {raw:?}")))
}

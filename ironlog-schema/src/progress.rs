//! Chart-ready payloads for the progress page and the dashboard.
//!
//! Two different "volume" metrics exist and are kept apart by name:
//! - strength volume (`volume`): reps x weight, used by [`ProgressReport`]
//! - calorie volume (`calorie_volume`): sum of per-set calories, used by [`WorkoutStats`]

use serde::{Deserialize, Serialize};

use crate::query::empty_as_none;
use crate::workout::WorkoutType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumePoint {
    /// Monday of the ISO week, rendered `dd.MM`.
    pub date: String,
    pub volume: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyPoint {
    pub label: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeCount {
    #[serde(rename = "type")]
    pub workout_type: WorkoutType,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseProgressPoint {
    /// Calendar day, rendered `dd.MM`.
    pub date: String,
    pub max_weight: f64,
    pub max_reps: i64,
    pub volume: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressReport {
    pub volume_data: Vec<VolumePoint>,
    pub frequency_data: Vec<FrequencyPoint>,
    pub type_data: Vec<TypeCount>,
    pub exercise_progress: Vec<ExerciseProgressPoint>,
    pub total_workouts: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutStats {
    pub total_workouts: usize,
    pub calorie_volume: f64,
    pub total_duration_secs: i64,
    /// Every type is present, zero counts included.
    pub workouts_by_type: Vec<TypeCount>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressQuery {
    /// Trailing window in whole months; absent or `0` means the default window.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub period: Option<u32>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub exercise_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatsQuery {
    /// `YYYY-MM-DD` or RFC 3339; inclusive.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub from: Option<String>,
    /// `YYYY-MM-DD` or RFC 3339; inclusive.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub to: Option<String>,
}

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::UnknownVariant;
use crate::exercise::Exercise;
use crate::query::empty_as_none;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkoutType {
    Strength,
    Cardio,
    Stretching,
    Mixed,
}

impl WorkoutType {
    pub const ALL: [WorkoutType; 4] = [
        WorkoutType::Strength,
        WorkoutType::Cardio,
        WorkoutType::Stretching,
        WorkoutType::Mixed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            WorkoutType::Strength => "STRENGTH",
            WorkoutType::Cardio => "CARDIO",
            WorkoutType::Stretching => "STRETCHING",
            WorkoutType::Mixed => "MIXED",
        }
    }

    /// Stable position inside [`WorkoutType::ALL`], handy for fixed-size counters.
    pub fn index(self) -> usize {
        match self {
            WorkoutType::Strength => 0,
            WorkoutType::Cardio => 1,
            WorkoutType::Stretching => 2,
            WorkoutType::Mixed => 3,
        }
    }
}

impl FromStr for WorkoutType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WorkoutType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "workout type",
                value: s.to_string(),
            })
    }
}

/// Where a workout came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkoutSource {
    #[default]
    Manual,
    ExternalSync,
}

impl WorkoutSource {
    pub fn as_str(self) -> &'static str {
        match self {
            WorkoutSource::Manual => "MANUAL",
            WorkoutSource::ExternalSync => "EXTERNAL_SYNC",
        }
    }
}

impl FromStr for WorkoutSource {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MANUAL" => Ok(WorkoutSource::Manual),
            "EXTERNAL_SYNC" => Ok(WorkoutSource::ExternalSync),
            other => Err(UnknownVariant {
                kind: "workout source",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: i64,
    pub date: NaiveDate,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    #[serde(rename = "type")]
    pub workout_type: WorkoutType,
    pub source: WorkoutSource,
    pub external_id: Option<String>,
    pub calories: Option<f64>,
    pub avg_heart_rate: Option<f64>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSet {
    pub id: i64,
    pub workout_id: i64,
    pub exercise_id: String,
    pub set_number: i64,
    pub reps: Option<i64>,
    pub weight: Option<f64>,
    /// Seconds.
    pub duration: Option<i64>,
    /// Meters.
    pub distance: Option<f64>,
    pub calories: Option<f64>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSetWithExercise {
    #[serde(flatten)]
    pub set: WorkoutSet,
    pub exercise: Exercise,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutWithSets {
    #[serde(flatten)]
    pub workout: Workout,
    pub sets: Vec<WorkoutSetWithExercise>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetInput {
    pub exercise_id: String,
    /// Client ordering hint; the server renumbers densely per exercise.
    #[serde(default)]
    pub set_number: Option<i64>,
    #[serde(default)]
    pub reps: Option<i64>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub duration: Option<i64>,
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub calories: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Create/replace body for a workout and its full set list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutInput {
    pub date: NaiveDate,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(rename = "type")]
    pub workout_type: WorkoutType,
    #[serde(default)]
    pub source: WorkoutSource,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub calories: Option<f64>,
    #[serde(default)]
    pub avg_heart_rate: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub sets: Vec<SetInput>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutQuery {
    #[serde(rename = "type", default, deserialize_with = "empty_as_none")]
    pub workout_type: Option<WorkoutType>,
    /// `YYYY-MM-DD` or RFC 3339; inclusive.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub from: Option<String>,
    /// `YYYY-MM-DD` or RFC 3339; inclusive.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub to: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub limit: Option<u32>,
}

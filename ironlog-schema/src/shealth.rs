//! Wire types of the health-platform exercise API.
//!
//! Timestamps stay raw strings here: a malformed record must reach the reconciler (and be counted
//! as skipped) instead of failing deserialization of the whole page.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ShealthExerciseList {
    #[serde(default)]
    pub exercises: Vec<ShealthExercise>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ShealthExercise {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub exercise_type: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    /// Seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calorie: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<ShealthHeartRate>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct ShealthHeartRate {
    #[serde(default)]
    pub average: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub min: Option<f64>,
}

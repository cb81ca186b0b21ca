use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::UnknownVariant;
use crate::query::empty_as_none;

/// Single classification tag per exercise, distinct from the free-form muscle-group tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrimaryMuscleGroup {
    Chest,
    Legs,
    Back,
    Shoulders,
    Biceps,
    Triceps,
    AbsHyperextension,
    Cardio,
    Flexibility,
}

impl PrimaryMuscleGroup {
    pub const ALL: [PrimaryMuscleGroup; 9] = [
        PrimaryMuscleGroup::Chest,
        PrimaryMuscleGroup::Legs,
        PrimaryMuscleGroup::Back,
        PrimaryMuscleGroup::Shoulders,
        PrimaryMuscleGroup::Biceps,
        PrimaryMuscleGroup::Triceps,
        PrimaryMuscleGroup::AbsHyperextension,
        PrimaryMuscleGroup::Cardio,
        PrimaryMuscleGroup::Flexibility,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PrimaryMuscleGroup::Chest => "CHEST",
            PrimaryMuscleGroup::Legs => "LEGS",
            PrimaryMuscleGroup::Back => "BACK",
            PrimaryMuscleGroup::Shoulders => "SHOULDERS",
            PrimaryMuscleGroup::Biceps => "BICEPS",
            PrimaryMuscleGroup::Triceps => "TRICEPS",
            PrimaryMuscleGroup::AbsHyperextension => "ABS_HYPEREXTENSION",
            PrimaryMuscleGroup::Cardio => "CARDIO",
            PrimaryMuscleGroup::Flexibility => "FLEXIBILITY",
        }
    }
}

impl FromStr for PrimaryMuscleGroup {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PrimaryMuscleGroup::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "primary muscle group",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub muscle_groups: Vec<String>,
    pub primary_muscle_group: PrimaryMuscleGroup,
    pub is_custom: bool,
}

/// List entry: the exercise plus the number of distinct workouts that used it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseWithUsage {
    #[serde(flatten)]
    pub exercise: Exercise,
    pub workout_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseRecentSet {
    pub id: i64,
    pub workout_id: i64,
    pub workout_date: NaiveDate,
    pub set_number: i64,
    pub reps: Option<i64>,
    pub weight: Option<f64>,
    pub duration: Option<i64>,
    pub distance: Option<f64>,
    pub calories: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseDetail {
    #[serde(flatten)]
    pub exercise: Exercise,
    /// Most recent sets first, capped server-side.
    pub recent_sets: Vec<ExerciseRecentSet>,
    pub set_count: i64,
}

/// Create/update body. `primary_muscle_group` has no default on purpose: a request without it is
/// rejected instead of silently classifying the exercise.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub muscle_groups: Vec<String>,
    pub primary_muscle_group: PrimaryMuscleGroup,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseQuery {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub search: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub primary_muscle_group: Option<PrimaryMuscleGroup>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub muscle_group: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub is_custom: Option<bool>,
}

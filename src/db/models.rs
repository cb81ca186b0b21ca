use chrono::{DateTime, NaiveDate, Utc};
use ironlog_schema::{
    Exercise, ExerciseRecentSet, ExerciseWithUsage, Workout, WorkoutSet, WorkoutSetWithExercise,
};
use sqlx::FromRow;
use sqlx::types::Json;

use crate::error::IronlogError;
use crate::sync::SyncToken;

#[derive(Debug, Clone, FromRow)]
pub struct DbExercise {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub muscle_groups: Json<Vec<String>>,
    pub primary_muscle_group: String,
    pub is_custom: bool,
}

impl TryFrom<DbExercise> for Exercise {
    type Error = IronlogError;

    fn try_from(row: DbExercise) -> Result<Self, Self::Error> {
        Ok(Exercise {
            id: row.id,
            name: row.name,
            description: row.description,
            muscle_groups: row.muscle_groups.0,
            primary_muscle_group: row.primary_muscle_group.parse()?,
            is_custom: row.is_custom,
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct DbExerciseUsage {
    #[sqlx(flatten)]
    pub exercise: DbExercise,
    pub workout_count: i64,
}

impl TryFrom<DbExerciseUsage> for ExerciseWithUsage {
    type Error = IronlogError;

    fn try_from(row: DbExerciseUsage) -> Result<Self, Self::Error> {
        Ok(ExerciseWithUsage {
            exercise: row.exercise.try_into()?,
            workout_count: row.workout_count,
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct DbWorkout {
    pub id: i64,
    pub date: NaiveDate,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub workout_type: String,
    pub source: String,
    pub external_id: Option<String>,
    pub calories: Option<f64>,
    pub avg_heart_rate: Option<f64>,
    pub notes: Option<String>,
}

impl TryFrom<DbWorkout> for Workout {
    type Error = IronlogError;

    fn try_from(row: DbWorkout) -> Result<Self, Self::Error> {
        Ok(Workout {
            id: row.id,
            date: row.date,
            start_time: row.start_time,
            end_time: row.end_time,
            workout_type: row.workout_type.parse()?,
            source: row.source.parse()?,
            external_id: row.external_id,
            calories: row.calories,
            avg_heart_rate: row.avg_heart_rate,
            notes: row.notes,
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct DbWorkoutSet {
    pub id: i64,
    pub workout_id: i64,
    pub exercise_id: String,
    pub set_number: i64,
    pub reps: Option<i64>,
    pub weight: Option<f64>,
    pub duration: Option<i64>,
    pub distance: Option<f64>,
    pub calories: Option<f64>,
    pub notes: Option<String>,
}

impl From<DbWorkoutSet> for WorkoutSet {
    fn from(row: DbWorkoutSet) -> Self {
        WorkoutSet {
            id: row.id,
            workout_id: row.workout_id,
            exercise_id: row.exercise_id,
            set_number: row.set_number,
            reps: row.reps,
            weight: row.weight,
            duration: row.duration,
            distance: row.distance,
            calories: row.calories,
            notes: row.notes,
        }
    }
}

/// A set joined with its exercise; exercise columns carry an `ex_` prefix.
#[derive(Debug, Clone, FromRow)]
pub struct DbSetWithExercise {
    #[sqlx(flatten)]
    pub set: DbWorkoutSet,
    pub ex_name: String,
    pub ex_description: Option<String>,
    pub ex_muscle_groups: Json<Vec<String>>,
    pub ex_primary_muscle_group: String,
    pub ex_is_custom: bool,
}

impl TryFrom<DbSetWithExercise> for WorkoutSetWithExercise {
    type Error = IronlogError;

    fn try_from(row: DbSetWithExercise) -> Result<Self, Self::Error> {
        let exercise = Exercise {
            id: row.set.exercise_id.clone(),
            name: row.ex_name,
            description: row.ex_description,
            muscle_groups: row.ex_muscle_groups.0,
            primary_muscle_group: row.ex_primary_muscle_group.parse()?,
            is_custom: row.ex_is_custom,
        };
        Ok(WorkoutSetWithExercise {
            set: row.set.into(),
            exercise,
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct DbRecentSet {
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

impl From<DbRecentSet> for ExerciseRecentSet {
    fn from(row: DbRecentSet) -> Self {
        ExerciseRecentSet {
            id: row.id,
            workout_id: row.workout_id,
            workout_date: row.workout_date,
            set_number: row.set_number,
            reps: row.reps,
            weight: row.weight,
            duration: row.duration,
            distance: row.distance,
            calories: row.calories,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct DbSyncToken {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: DateTime<Utc>,
    pub last_sync_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DbSyncToken> for SyncToken {
    fn from(row: DbSyncToken) -> Self {
        SyncToken {
            access_token: row.access_token,
            refresh_token: row.refresh_token,
            expires_at: row.expires_at,
            last_sync_at: row.last_sync_at,
        }
    }
}

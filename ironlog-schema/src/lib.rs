pub mod exercise;
pub mod progress;
mod query;
pub mod shealth;
pub mod sync;
pub mod workout;

pub use exercise::{
    Exercise, ExerciseDetail, ExerciseInput, ExerciseQuery, ExerciseRecentSet, ExerciseWithUsage,
    PrimaryMuscleGroup,
};
pub use progress::{
    ExerciseProgressPoint, FrequencyPoint, ProgressQuery, ProgressReport, StatsQuery, TypeCount,
    VolumePoint, WorkoutStats,
};
pub use shealth::{ShealthExercise, ShealthExerciseList, ShealthHeartRate};
pub use sync::{SyncReport, SyncRequest, SyncResponse, SyncStatus};
pub use workout::{
    SetInput, Workout, WorkoutInput, WorkoutQuery, WorkoutSet, WorkoutSetWithExercise,
    WorkoutSource, WorkoutType, WorkoutWithSets,
};

/// Error returned when a wire string does not name a known enum variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl std::fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown {}: {:?}", self.kind, self.value)
    }
}

impl std::error::Error for UnknownVariant {}

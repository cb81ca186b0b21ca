pub mod exercises;
pub mod oauth;
pub mod progress;
pub mod sync;
pub mod workouts;

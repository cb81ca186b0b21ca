//! Database module: an actor that owns the SQLite pool, plus the queries it runs.
//!
//! Layout:
//! - `actor.rs`: message enum, handle and the actor itself
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database
//! - `exercises.rs`, `workouts.rs`, `sync.rs`: queries grouped by table

pub mod actor;
pub mod models;
pub mod schema;

mod exercises;
mod sync;
mod workouts;

pub use actor::{DbActorHandle, DbActorMessage, spawn};
pub use exercises::RECENT_SET_LIMIT;
pub use schema::SQLITE_INIT;
pub use workouts::WorkoutFilter;

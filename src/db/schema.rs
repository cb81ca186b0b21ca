//! SQL DDL for initializing the database schema (SQLite).

/// SQLite schema includes:
/// - `exercises` (built-in catalog plus custom entries, keyed by slug)
/// - `workouts` (manual and synced sessions; `external_id` is the sync dedup key)
/// - `workout_sets` (owned by a workout, numbered per exercise)
/// - `sync_token` (single-row credential store of the health-platform integration)
pub const SQLITE_INIT: &str = r#"
-- ---------------------------------------------------------------------------
-- Exercise library
-- ---------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS exercises (
    id TEXT PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    description TEXT NULL,
    muscle_groups TEXT NOT NULL DEFAULT '[]', -- JSON array of tags
    primary_muscle_group TEXT NOT NULL,
    is_custom INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL, -- RFC3339
    updated_at TEXT NOT NULL -- RFC3339
);

CREATE INDEX IF NOT EXISTS idx_exercises_name ON exercises(name);

-- ---------------------------------------------------------------------------
-- Workouts
-- ---------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS workouts (
    id INTEGER PRIMARY KEY NOT NULL,
    date TEXT NOT NULL, -- YYYY-MM-DD
    start_time TEXT NOT NULL, -- RFC3339
    end_time TEXT NULL, -- RFC3339
    workout_type TEXT NOT NULL,
    source TEXT NOT NULL DEFAULT 'MANUAL',
    external_id TEXT NULL UNIQUE,
    calories REAL NULL,
    avg_heart_rate REAL NULL,
    notes TEXT NULL,
    created_at TEXT NOT NULL, -- RFC3339
    updated_at TEXT NOT NULL -- RFC3339
);

CREATE INDEX IF NOT EXISTS idx_workouts_date ON workouts(date);

-- ---------------------------------------------------------------------------
-- Sets (numbered 1..n per (workout, exercise))
-- ---------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS workout_sets (
    id INTEGER PRIMARY KEY NOT NULL,
    workout_id INTEGER NOT NULL REFERENCES workouts(id) ON DELETE CASCADE,
    exercise_id TEXT NOT NULL REFERENCES exercises(id),
    set_number INTEGER NOT NULL,
    reps INTEGER NULL,
    weight REAL NULL,
    duration INTEGER NULL, -- seconds
    distance REAL NULL, -- meters
    calories REAL NULL,
    notes TEXT NULL
);

CREATE INDEX IF NOT EXISTS idx_workout_sets_workout ON workout_sets(workout_id);
CREATE INDEX IF NOT EXISTS idx_workout_sets_exercise ON workout_sets(exercise_id);

-- ---------------------------------------------------------------------------
-- Health-platform credential (singleton)
-- ---------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS sync_token (
    id INTEGER PRIMARY KEY NOT NULL CHECK (id = 1),
    access_token TEXT NOT NULL,
    refresh_token TEXT NULL,
    expires_at TEXT NOT NULL, -- RFC3339
    last_sync_at TEXT NULL, -- RFC3339
    created_at TEXT NOT NULL, -- RFC3339
    updated_at TEXT NOT NULL -- RFC3339
);
"#;

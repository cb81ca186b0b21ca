use chrono::{TimeDelta, TimeZone, Utc};
use ironlog::sync::SyncToken;
use ironlog_schema::{
    ExerciseInput, ExerciseQuery, PrimaryMuscleGroup, SetInput, ShealthExercise, WorkoutSource,
    WorkoutType,
};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::SystemTime;

fn database_url(name: &str) -> String {
    let mut hasher = DefaultHasher::new();
    SystemTime::now().hash(&mut hasher);
    name.hash(&mut hasher);
    let db_path = std::env::temp_dir().join(format!(
        "ironlog_{name}_{}_{}.sqlite",
        std::process::id(),
        hasher.finish()
    ));
    format!("sqlite:{}", db_path.display())
}

fn vendor_record(id: &str, calorie: f64) -> ShealthExercise {
    ShealthExercise {
        id: id.to_string(),
        exercise_type: "CYCLING".to_string(),
        start_time: "2026-03-05T17:00:00Z".to_string(),
        end_time: "2026-03-05T18:15:00Z".to_string(),
        duration: Some(4500.0),
        calorie: Some(calorie),
        ..ShealthExercise::default()
    }
}

#[tokio::test]
async fn test_sync_token_baseline() {
    let db = ironlog::db::spawn(&database_url("token"))
        .await
        .expect("spawn db actor");

    // 1. Fresh database has no credential.
    assert!(db.get_sync_token().await.unwrap().is_none());
    assert!(!db.delete_sync_token().await.unwrap());

    // 2. Save a token that has already synced once.
    let synced_at = Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap();
    let first = SyncToken {
        access_token: "at-1".to_string(),
        refresh_token: Some("rt-1".to_string()),
        expires_at: synced_at + TimeDelta::hours(1),
        last_sync_at: Some(synced_at),
    };
    db.save_sync_token(first.clone()).await.unwrap();
    assert_eq!(db.get_sync_token().await.unwrap(), Some(first));

    // 3. A refreshed token without a sync timestamp keeps the stored one.
    let refreshed = SyncToken {
        access_token: "at-2".to_string(),
        refresh_token: Some("rt-1".to_string()),
        expires_at: synced_at + TimeDelta::hours(2),
        last_sync_at: None,
    };
    db.save_sync_token(refreshed).await.unwrap();
    let stored = db.get_sync_token().await.unwrap().expect("token stored");
    assert_eq!(stored.access_token, "at-2");
    assert_eq!(stored.last_sync_at, Some(synced_at));

    // 4. Disconnect removes it.
    assert!(db.delete_sync_token().await.unwrap());
    assert!(db.get_sync_token().await.unwrap().is_none());
}

#[tokio::test]
async fn test_reconcile_updates_synced_fields_and_keeps_sets() {
    let db = ironlog::db::spawn(&database_url("reconcile"))
        .await
        .expect("spawn db actor");
    let now = Utc::now();

    let report = db
        .reconcile(vec![vendor_record("ext-bike", 500.0)], now)
        .await
        .unwrap();
    assert_eq!((report.imported, report.updated, report.total), (1, 0, 1));

    let workouts = db
        .list_workouts(ironlog::db::WorkoutFilter::default())
        .await
        .unwrap();
    assert_eq!(workouts.len(), 1);
    let synced = &workouts[0].workout;
    assert_eq!(synced.source, WorkoutSource::ExternalSync);
    assert_eq!(synced.workout_type, WorkoutType::Cardio);
    assert_eq!(synced.external_id.as_deref(), Some("ext-bike"));
    assert_eq!(synced.calories, Some(500.0));

    // Sets logged by hand on a synced workout survive the next sync.
    let exercise = db
        .create_exercise(ExerciseInput {
            name: "Bike Sprint".to_string(),
            description: None,
            muscle_groups: vec!["legs".to_string()],
            primary_muscle_group: PrimaryMuscleGroup::Cardio,
        })
        .await
        .unwrap();
    db.add_set(
        synced.id,
        SetInput {
            exercise_id: exercise.id.clone(),
            set_number: None,
            reps: None,
            weight: None,
            duration: Some(30),
            distance: None,
            calories: Some(12.0),
            notes: None,
        },
    )
    .await
    .unwrap();

    let report = db
        .reconcile(
            vec![vendor_record("ext-bike", 520.0), vendor_record(" ", 1.0)],
            now,
        )
        .await
        .unwrap();
    assert_eq!(
        (report.imported, report.updated, report.skipped, report.total),
        (0, 1, 1, 2)
    );

    let after = db.get_workout(synced.id).await.unwrap();
    assert_eq!(after.workout.calories, Some(520.0));
    assert_eq!(after.sets.len(), 1);
    assert_eq!(after.sets[0].exercise.id, exercise.id);
}

#[tokio::test]
async fn test_seeding_is_repeatable_and_spares_custom_exercises() {
    let db = ironlog::db::spawn(&database_url("seed"))
        .await
        .expect("spawn db actor");

    let written = db.seed_builtins().await.unwrap();
    assert!(written > 0);
    let custom = db
        .create_exercise(ExerciseInput {
            name: "Farmer Walk".to_string(),
            description: Some("Loaded carry".to_string()),
            muscle_groups: Vec::new(),
            primary_muscle_group: PrimaryMuscleGroup::Back,
        })
        .await
        .unwrap();
    assert!(custom.is_custom);

    // An edited built-in keeps its flag and is not reverted by the next seed.
    let builtin_id = first_builtin_id(&db).await;
    let edited = db
        .update_exercise(
            builtin_id.clone(),
            ExerciseInput {
                name: "Bench Press (paused)".to_string(),
                description: Some("Two-second pause on the chest".to_string()),
                muscle_groups: vec!["chest".to_string()],
                primary_muscle_group: PrimaryMuscleGroup::Chest,
            },
        )
        .await
        .unwrap();
    assert!(!edited.is_custom);

    let before = db.list_exercises(ExerciseQuery::default()).await.unwrap();
    assert_eq!(db.seed_builtins().await.unwrap(), 0);
    let after = db.list_exercises(ExerciseQuery::default()).await.unwrap();
    assert_eq!(before.len(), after.len());
    assert_eq!(db.get_exercise(builtin_id).await.unwrap().exercise, edited);

    let builtin_count = after.iter().filter(|e| !e.exercise.is_custom).count();
    assert_eq!(builtin_count, ironlog::exercise::BUILTIN_EXERCISES.len());

    let detail = db.get_exercise(custom.id.clone()).await.unwrap();
    assert_eq!(detail.exercise, custom);
}

async fn first_builtin_id(db: &ironlog::db::DbActorHandle) -> String {
    let builtins = db
        .list_exercises(ExerciseQuery {
            is_custom: Some(false),
            ..ExerciseQuery::default()
        })
        .await
        .unwrap();
    builtins[0].exercise.id.clone()
}

//! Workout and set queries. Every write that touches set numbering runs in one transaction.

use ahash::AHashMap;
use chrono::{NaiveDate, Utc};
use ironlog_schema::{
    SetInput, Workout, WorkoutInput, WorkoutSet, WorkoutSetWithExercise, WorkoutType,
    WorkoutWithSets,
};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};
use tracing::debug;

use crate::db::models::{DbSetWithExercise, DbWorkout, DbWorkoutSet};
use crate::error::IronlogError;
use crate::workout::{assign_set_numbers, next_set_number, remove_and_renumber};

/// Row selection for workout listings.
#[derive(Debug, Clone, Default)]
pub struct WorkoutFilter {
    pub workout_type: Option<WorkoutType>,
    /// Inclusive.
    pub from: Option<NaiveDate>,
    /// Inclusive.
    pub to: Option<NaiveDate>,
    pub limit: Option<u32>,
    /// Oldest first when set; the API listing is newest first.
    pub ascending: bool,
}

const WORKOUT_COLUMNS: &str = "id, date, start_time, end_time, workout_type, source, external_id, \
     calories, avg_heart_rate, notes";

const SET_WITH_EXERCISE_SELECT: &str = r#"
    SELECT s.id, s.workout_id, s.exercise_id, s.set_number, s.reps, s.weight, s.duration,
        s.distance, s.calories, s.notes,
        e.name AS ex_name, e.description AS ex_description, e.muscle_groups AS ex_muscle_groups,
        e.primary_muscle_group AS ex_primary_muscle_group, e.is_custom AS ex_is_custom
    FROM workout_sets s
    JOIN exercises e ON e.id = s.exercise_id
"#;

pub(crate) async fn list(
    pool: &SqlitePool,
    filter: &WorkoutFilter,
) -> Result<Vec<WorkoutWithSets>, IronlogError> {
    let mut conn = pool.acquire().await?;

    let mut qb: QueryBuilder<Sqlite> =
        QueryBuilder::new(format!("SELECT {WORKOUT_COLUMNS} FROM workouts WHERE 1 = 1"));
    if let Some(t) = filter.workout_type {
        qb.push(" AND workout_type = ").push_bind(t.as_str());
    }
    if let Some(from) = filter.from {
        qb.push(" AND date >= ").push_bind(from);
    }
    if let Some(to) = filter.to {
        qb.push(" AND date <= ").push_bind(to);
    }
    qb.push(if filter.ascending {
        " ORDER BY date ASC, start_time ASC, id ASC"
    } else {
        " ORDER BY date DESC, start_time DESC, id DESC"
    });
    if let Some(limit) = filter.limit {
        qb.push(" LIMIT ").push_bind(i64::from(limit));
    }

    let rows = qb
        .build_query_as::<DbWorkout>()
        .fetch_all(&mut *conn)
        .await?;
    attach_sets(&mut conn, rows).await
}

async fn attach_sets(
    conn: &mut SqliteConnection,
    rows: Vec<DbWorkout>,
) -> Result<Vec<WorkoutWithSets>, IronlogError> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(SET_WITH_EXERCISE_SELECT);
    qb.push(" WHERE s.workout_id IN (");
    let mut ids = qb.separated(", ");
    for row in &rows {
        ids.push_bind(row.id);
    }
    ids.push_unseparated(")");
    qb.push(" ORDER BY s.workout_id, s.id");

    let mut by_workout: AHashMap<i64, Vec<WorkoutSetWithExercise>> = AHashMap::new();
    for set in qb
        .build_query_as::<DbSetWithExercise>()
        .fetch_all(conn)
        .await?
    {
        let set = WorkoutSetWithExercise::try_from(set)?;
        by_workout.entry(set.set.workout_id).or_default().push(set);
    }

    rows.into_iter()
        .map(|row| {
            let sets = by_workout.remove(&row.id).unwrap_or_default();
            Ok(WorkoutWithSets {
                workout: Workout::try_from(row)?,
                sets,
            })
        })
        .collect()
}

async fn fetch(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<Option<WorkoutWithSets>, IronlogError> {
    let row = sqlx::query_as::<_, DbWorkout>(&format!(
        "SELECT {WORKOUT_COLUMNS} FROM workouts WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    match row {
        Some(row) => Ok(attach_sets(conn, vec![row]).await?.pop()),
        None => Ok(None),
    }
}

pub(crate) async fn get(pool: &SqlitePool, id: i64) -> Result<WorkoutWithSets, IronlogError> {
    let mut conn = pool.acquire().await?;
    fetch(&mut conn, id)
        .await?
        .ok_or_else(|| IronlogError::not_found("workout", id))
}

async fn workout_exists(conn: &mut SqliteConnection, id: i64) -> Result<bool, IronlogError> {
    let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM workouts WHERE id = ?")
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(found.is_some())
}

async fn ensure_exercises_exist<'a>(
    conn: &mut SqliteConnection,
    exercise_ids: impl IntoIterator<Item = &'a str>,
) -> Result<(), IronlogError> {
    let mut checked: Vec<&str> = Vec::new();
    for id in exercise_ids {
        if checked.contains(&id) {
            continue;
        }
        let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM exercises WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        if found.is_none() {
            return Err(IronlogError::Validation(format!("unknown exercise: {id}")));
        }
        checked.push(id);
    }
    Ok(())
}

/// Rejects an `external_id` already held by a workout other than `own_id`.
async fn ensure_external_id_free(
    conn: &mut SqliteConnection,
    external_id: Option<&str>,
    own_id: Option<i64>,
) -> Result<(), IronlogError> {
    let Some(external_id) = external_id else {
        return Ok(());
    };
    let holder: Option<i64> = sqlx::query_scalar("SELECT id FROM workouts WHERE external_id = ?")
        .bind(external_id)
        .fetch_optional(conn)
        .await?;
    match holder {
        Some(holder) if Some(holder) != own_id => Err(IronlogError::Conflict(format!(
            "externalId {external_id} already belongs to workout {holder}"
        ))),
        _ => Ok(()),
    }
}

async fn insert_set(
    conn: &mut SqliteConnection,
    workout_id: i64,
    set: &SetInput,
    set_number: i64,
) -> Result<i64, IronlogError> {
    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO workout_sets (
            workout_id, exercise_id, set_number, reps, weight, duration, distance, calories, notes
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(workout_id)
    .bind(&set.exercise_id)
    .bind(set_number)
    .bind(set.reps)
    .bind(set.weight)
    .bind(set.duration)
    .bind(set.distance)
    .bind(set.calories)
    .bind(&set.notes)
    .fetch_one(conn)
    .await?;
    Ok(id)
}

async fn insert_sets(
    conn: &mut SqliteConnection,
    workout_id: i64,
    sets: &[SetInput],
) -> Result<(), IronlogError> {
    let numbers = assign_set_numbers(sets);
    for (set, number) in sets.iter().zip(numbers) {
        insert_set(&mut *conn, workout_id, set, number).await?;
    }
    Ok(())
}

pub(crate) async fn create(
    pool: &SqlitePool,
    input: WorkoutInput,
) -> Result<WorkoutWithSets, IronlogError> {
    let mut tx = pool.begin().await?;
    ensure_external_id_free(&mut tx, input.external_id.as_deref(), None).await?;
    let exercise_ids: Vec<&str> = input.sets.iter().map(|s| s.exercise_id.as_str()).collect();
    ensure_exercises_exist(&mut tx, exercise_ids).await?;

    let now = Utc::now();
    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO workouts (
            date, start_time, end_time, workout_type, source, external_id,
            calories, avg_heart_rate, notes, created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(input.date)
    .bind(input.start_time)
    .bind(input.end_time)
    .bind(input.workout_type.as_str())
    .bind(input.source.as_str())
    .bind(&input.external_id)
    .bind(input.calories)
    .bind(input.avg_heart_rate)
    .bind(&input.notes)
    .bind(now)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    insert_sets(&mut tx, id, &input.sets).await?;
    let created = fetch(&mut tx, id)
        .await?
        .ok_or_else(|| IronlogError::not_found("workout", id))?;
    tx.commit().await?;

    debug!(id, sets = created.sets.len(), "workout created");
    Ok(created)
}

/// Full replacement of a workout and its set list.
pub(crate) async fn replace(
    pool: &SqlitePool,
    id: i64,
    input: WorkoutInput,
) -> Result<WorkoutWithSets, IronlogError> {
    let mut tx = pool.begin().await?;
    if !workout_exists(&mut tx, id).await? {
        return Err(IronlogError::not_found("workout", id));
    }
    ensure_external_id_free(&mut tx, input.external_id.as_deref(), Some(id)).await?;
    let exercise_ids: Vec<&str> = input.sets.iter().map(|s| s.exercise_id.as_str()).collect();
    ensure_exercises_exist(&mut tx, exercise_ids).await?;

    sqlx::query(
        r#"
        UPDATE workouts
        SET date = ?, start_time = ?, end_time = ?, workout_type = ?, source = ?, external_id = ?,
            calories = ?, avg_heart_rate = ?, notes = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(input.date)
    .bind(input.start_time)
    .bind(input.end_time)
    .bind(input.workout_type.as_str())
    .bind(input.source.as_str())
    .bind(&input.external_id)
    .bind(input.calories)
    .bind(input.avg_heart_rate)
    .bind(&input.notes)
    .bind(Utc::now())
    .bind(id)
    .execute(&mut *tx)
    .await?;

    sqlx::query("DELETE FROM workout_sets WHERE workout_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    insert_sets(&mut tx, id, &input.sets).await?;

    let replaced = fetch(&mut tx, id)
        .await?
        .ok_or_else(|| IronlogError::not_found("workout", id))?;
    tx.commit().await?;
    Ok(replaced)
}

pub(crate) async fn delete(pool: &SqlitePool, id: i64) -> Result<(), IronlogError> {
    let res = sqlx::query("DELETE FROM workouts WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if res.rows_affected() == 0 {
        return Err(IronlogError::not_found("workout", id));
    }
    Ok(())
}

async fn load_sets(
    conn: &mut SqliteConnection,
    workout_id: i64,
) -> Result<Vec<WorkoutSet>, IronlogError> {
    let rows = sqlx::query_as::<_, DbWorkoutSet>(
        r#"
        SELECT id, workout_id, exercise_id, set_number, reps, weight, duration, distance, calories, notes
        FROM workout_sets
        WHERE workout_id = ?
        ORDER BY id
        "#,
    )
    .bind(workout_id)
    .fetch_all(conn)
    .await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

async fn fetch_set(
    conn: &mut SqliteConnection,
    set_id: i64,
) -> Result<WorkoutSetWithExercise, IronlogError> {
    let row = sqlx::query_as::<_, DbSetWithExercise>(&format!(
        "{SET_WITH_EXERCISE_SELECT} WHERE s.id = ?"
    ))
    .bind(set_id)
    .fetch_optional(conn)
    .await?
    .ok_or_else(|| IronlogError::not_found("set", set_id))?;
    row.try_into()
}

/// Appends a set; its number is one past the current count of its exercise group.
pub(crate) async fn add_set(
    pool: &SqlitePool,
    workout_id: i64,
    set: SetInput,
) -> Result<WorkoutSetWithExercise, IronlogError> {
    let mut tx = pool.begin().await?;
    if !workout_exists(&mut tx, workout_id).await? {
        return Err(IronlogError::not_found("workout", workout_id));
    }
    ensure_exercises_exist(&mut tx, [set.exercise_id.as_str()]).await?;

    let existing = load_sets(&mut tx, workout_id).await?;
    let number = next_set_number(&existing, &set.exercise_id);
    let set_id = insert_set(&mut tx, workout_id, &set, number).await?;
    let created = fetch_set(&mut tx, set_id).await?;
    tx.commit().await?;

    debug!(workout_id, set_id, set_number = number, "set appended");
    Ok(created)
}

/// Deletes a set and closes the numbering gap it leaves in its exercise group.
pub(crate) async fn remove_set(
    pool: &SqlitePool,
    workout_id: i64,
    set_id: i64,
) -> Result<(), IronlogError> {
    let mut tx = pool.begin().await?;
    if !workout_exists(&mut tx, workout_id).await? {
        return Err(IronlogError::not_found("workout", workout_id));
    }

    let mut sets = load_sets(&mut tx, workout_id).await?;
    let (removed, renumbered) = remove_and_renumber(&mut sets, set_id)
        .ok_or_else(|| IronlogError::not_found("set", set_id))?;

    sqlx::query("DELETE FROM workout_sets WHERE id = ?")
        .bind(removed.id)
        .execute(&mut *tx)
        .await?;
    for &(id, set_number) in &renumbered {
        sqlx::query("UPDATE workout_sets SET set_number = ? WHERE id = ?")
            .bind(set_number)
            .bind(id)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;

    debug!(
        workout_id,
        set_id,
        renumbered = renumbered.len(),
        "set removed"
    );
    Ok(())
}

//! Exercise library queries.

use chrono::Utc;
use ironlog_schema::{Exercise, ExerciseDetail, ExerciseInput, ExerciseQuery, ExerciseWithUsage};
use sqlx::types::Json;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info};

use crate::db::models::{DbExercise, DbExerciseUsage, DbRecentSet};
use crate::error::IronlogError;
use crate::exercise::{BUILTIN_EXERCISES, exercise_id_for, matches_query, slugify};

/// Number of recent sets returned by the exercise detail view.
pub const RECENT_SET_LIMIT: i64 = 50;

const EXERCISE_COLUMNS: &str =
    "id, name, description, muscle_groups, primary_muscle_group, is_custom";

pub(crate) async fn list(
    pool: &SqlitePool,
    query: &ExerciseQuery,
) -> Result<Vec<ExerciseWithUsage>, IronlogError> {
    let rows = sqlx::query_as::<_, DbExerciseUsage>(
        r#"
        SELECT e.id, e.name, e.description, e.muscle_groups, e.primary_muscle_group, e.is_custom,
            (SELECT COUNT(DISTINCT s.workout_id) FROM workout_sets s WHERE s.exercise_id = e.id)
                AS workout_count
        FROM exercises e
        ORDER BY e.name, e.id
        "#,
    )
    .fetch_all(pool)
    .await?;

    // Tag and search matching is case-insensitive over Cyrillic, which SQLite's LOWER() is not.
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        let item = ExerciseWithUsage::try_from(row)?;
        if matches_query(&item.exercise, query) {
            out.push(item);
        }
    }
    Ok(out)
}

pub(crate) async fn fetch(
    conn: &mut SqliteConnection,
    id: &str,
) -> Result<Option<Exercise>, IronlogError> {
    let row = sqlx::query_as::<_, DbExercise>(&format!(
        "SELECT {EXERCISE_COLUMNS} FROM exercises WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(conn)
    .await?;
    row.map(Exercise::try_from).transpose()
}

pub(crate) async fn detail(pool: &SqlitePool, id: &str) -> Result<ExerciseDetail, IronlogError> {
    let mut conn = pool.acquire().await?;
    let exercise = fetch(&mut conn, id)
        .await?
        .ok_or_else(|| IronlogError::not_found("exercise", id))?;

    let recent_sets = sqlx::query_as::<_, DbRecentSet>(
        r#"
        SELECT s.id, s.workout_id, w.date AS workout_date, s.set_number,
            s.reps, s.weight, s.duration, s.distance, s.calories
        FROM workout_sets s
        JOIN workouts w ON w.id = s.workout_id
        WHERE s.exercise_id = ?
        ORDER BY w.date DESC, w.start_time DESC, s.set_number ASC
        LIMIT ?
        "#,
    )
    .bind(id)
    .bind(RECENT_SET_LIMIT)
    .fetch_all(&mut *conn)
    .await?;

    let set_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM workout_sets WHERE exercise_id = ?")
            .bind(id)
            .fetch_one(&mut *conn)
            .await?;

    Ok(ExerciseDetail {
        exercise,
        recent_sets: recent_sets.into_iter().map(Into::into).collect(),
        set_count,
    })
}

async fn id_taken(conn: &mut SqliteConnection, id: &str) -> Result<bool, IronlogError> {
    let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM exercises WHERE id = ?")
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(found.is_some())
}

pub(crate) async fn create(
    pool: &SqlitePool,
    input: ExerciseInput,
) -> Result<Exercise, IronlogError> {
    let mut tx = pool.begin().await?;

    let base = exercise_id_for(&input.name);
    let mut id = base.clone();
    let mut suffix = 2;
    while id_taken(&mut tx, &id).await? {
        id = format!("{base}-{suffix}");
        suffix += 1;
    }

    let now = Utc::now();
    sqlx::query(
        r#"
        INSERT INTO exercises (
            id, name, description, muscle_groups, primary_muscle_group, is_custom, created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, 1, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&input.name)
    .bind(&input.description)
    .bind(Json(&input.muscle_groups))
    .bind(input.primary_muscle_group.as_str())
    .bind(now)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    debug!(id = %id, "custom exercise created");

    Ok(Exercise {
        id,
        name: input.name,
        description: input.description,
        muscle_groups: input.muscle_groups,
        primary_muscle_group: input.primary_muscle_group,
        is_custom: true,
    })
}

/// Rewrites an exercise in place. The id and the custom flag stay stable even when the name changes.
pub(crate) async fn update(
    pool: &SqlitePool,
    id: &str,
    input: ExerciseInput,
) -> Result<Exercise, IronlogError> {
    let mut tx = pool.begin().await?;
    let existing = fetch(&mut tx, id)
        .await?
        .ok_or_else(|| IronlogError::not_found("exercise", id))?;

    sqlx::query(
        r#"
        UPDATE exercises
        SET name = ?, description = ?, muscle_groups = ?, primary_muscle_group = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&input.name)
    .bind(&input.description)
    .bind(Json(&input.muscle_groups))
    .bind(input.primary_muscle_group.as_str())
    .bind(Utc::now())
    .bind(id)
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;

    Ok(Exercise {
        id: existing.id,
        name: input.name,
        description: input.description,
        muscle_groups: input.muscle_groups,
        primary_muscle_group: input.primary_muscle_group,
        is_custom: existing.is_custom,
    })
}

pub(crate) async fn delete(pool: &SqlitePool, id: &str) -> Result<(), IronlogError> {
    let mut tx = pool.begin().await?;
    let existing = fetch(&mut tx, id)
        .await?
        .ok_or_else(|| IronlogError::not_found("exercise", id))?;
    if !existing.is_custom {
        return Err(IronlogError::Forbidden(
            "built-in exercises cannot be deleted".to_string(),
        ));
    }

    let in_use: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM workout_sets WHERE exercise_id = ?")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
    if in_use > 0 {
        return Err(IronlogError::Conflict(format!(
            "exercise {id} is used by {in_use} set(s)"
        )));
    }

    sqlx::query("DELETE FROM exercises WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;
    Ok(())
}

/// Inserts missing built-in catalog entries. Existing rows, edited or custom, are left untouched.
pub(crate) async fn seed_builtins(pool: &SqlitePool) -> Result<usize, IronlogError> {
    let mut tx = pool.begin().await?;
    let now = Utc::now();
    let mut written = 0;

    for builtin in BUILTIN_EXERCISES {
        let res = sqlx::query(
            r#"
            INSERT INTO exercises (
                id, name, description, muscle_groups, primary_muscle_group, is_custom, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, 0, ?, ?)
            ON CONFLICT(id) DO NOTHING
            "#,
        )
        .bind(slugify(builtin.name))
        .bind(builtin.name)
        .bind(builtin.description)
        .bind(Json(builtin.muscle_groups))
        .bind(builtin.primary.as_str())
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;
        written += usize::try_from(res.rows_affected()).unwrap_or(0);
    }

    tx.commit().await?;
    info!(count = written, "built-in exercise catalog seeded");
    Ok(written)
}

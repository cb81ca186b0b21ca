//! Sync credential storage and the SQLite side of the reconciler.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ironlog_schema::{ShealthExercise, SyncReport, WorkoutSource};
use sqlx::{SqliteConnection, SqlitePool};

use crate::db::models::DbSyncToken;
use crate::error::IronlogError;
use crate::sync::{ExternalWorkout, SyncToken, WorkoutStore, reconcile};

pub(crate) async fn get_token(pool: &SqlitePool) -> Result<Option<SyncToken>, IronlogError> {
    let row = sqlx::query_as::<_, DbSyncToken>(
        r#"
        SELECT access_token, refresh_token, expires_at, last_sync_at, created_at, updated_at
        FROM sync_token
        WHERE id = 1
        "#,
    )
    .fetch_optional(pool)
    .await?;
    Ok(row.map(Into::into))
}

/// Upserts the singleton credential. `last_sync_at` of an existing row is kept.
pub(crate) async fn save_token(pool: &SqlitePool, token: SyncToken) -> Result<(), IronlogError> {
    let now = Utc::now();
    sqlx::query(
        r#"
        INSERT INTO sync_token (
            id, access_token, refresh_token, expires_at, last_sync_at, created_at, updated_at
        )
        VALUES (1, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(id) DO UPDATE SET
            access_token = excluded.access_token,
            refresh_token = excluded.refresh_token,
            expires_at = excluded.expires_at,
            last_sync_at = COALESCE(excluded.last_sync_at, last_sync_at),
            updated_at = excluded.updated_at
        "#,
    )
    .bind(token.access_token)
    .bind(token.refresh_token)
    .bind(token.expires_at)
    .bind(token.last_sync_at)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(())
}

/// Returns whether a credential existed.
pub(crate) async fn delete_token(pool: &SqlitePool) -> Result<bool, IronlogError> {
    let res = sqlx::query("DELETE FROM sync_token WHERE id = 1")
        .execute(pool)
        .await?;
    Ok(res.rows_affected() > 0)
}

/// [`WorkoutStore`] over one open SQLite connection (a transaction in practice).
pub(crate) struct SqliteWorkoutStore<'c> {
    conn: &'c mut SqliteConnection,
}

#[async_trait]
impl<'c> WorkoutStore for SqliteWorkoutStore<'c> {
    async fn find_by_external_id(
        &mut self,
        external_id: &str,
    ) -> Result<Option<i64>, IronlogError> {
        let id: Option<i64> = sqlx::query_scalar("SELECT id FROM workouts WHERE external_id = ?")
            .bind(external_id)
            .fetch_optional(&mut *self.conn)
            .await?;
        Ok(id)
    }

    async fn insert_external(&mut self, workout: &ExternalWorkout) -> Result<i64, IronlogError> {
        let now = Utc::now();
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO workouts (
                date, start_time, end_time, workout_type, source, external_id,
                calories, avg_heart_rate, notes, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, NULL, ?, ?)
            RETURNING id
            "#,
        )
        .bind(workout.date)
        .bind(workout.start_time)
        .bind(workout.end_time)
        .bind(workout.workout_type.as_str())
        .bind(WorkoutSource::ExternalSync.as_str())
        .bind(&workout.external_id)
        .bind(workout.calories)
        .bind(workout.avg_heart_rate)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *self.conn)
        .await?;
        Ok(id)
    }

    async fn update_external(
        &mut self,
        id: i64,
        workout: &ExternalWorkout,
    ) -> Result<(), IronlogError> {
        sqlx::query(
            r#"
            UPDATE workouts
            SET date = ?, start_time = ?, end_time = ?, workout_type = ?, source = ?,
                calories = ?, avg_heart_rate = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(workout.date)
        .bind(workout.start_time)
        .bind(workout.end_time)
        .bind(workout.workout_type.as_str())
        .bind(WorkoutSource::ExternalSync.as_str())
        .bind(workout.calories)
        .bind(workout.avg_heart_rate)
        .bind(Utc::now())
        .bind(id)
        .execute(&mut *self.conn)
        .await?;
        Ok(())
    }

    async fn touch_last_sync(&mut self, at: DateTime<Utc>) -> Result<(), IronlogError> {
        sqlx::query("UPDATE sync_token SET last_sync_at = ?, updated_at = ? WHERE id = 1")
            .bind(at)
            .bind(at)
            .execute(&mut *self.conn)
            .await?;
        Ok(())
    }
}

/// Runs one reconciliation batch in a single transaction; a failure leaves no partial writes.
pub(crate) async fn reconcile_batch(
    pool: &SqlitePool,
    records: &[ShealthExercise],
    now: DateTime<Utc>,
) -> Result<SyncReport, IronlogError> {
    let mut tx = pool.begin().await?;
    let report = {
        let mut store = SqliteWorkoutStore { conn: &mut *tx };
        reconcile(&mut store, records, now).await?
    };
    tx.commit().await?;
    Ok(report)
}

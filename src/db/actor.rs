use crate::db::schema::SQLITE_INIT;
use crate::db::workouts::WorkoutFilter;
use crate::db::{exercises, sync, workouts};
use crate::error::IronlogError;
use crate::sync::SyncToken;
use chrono::{DateTime, Utc};
use ironlog_schema::{
    Exercise, ExerciseDetail, ExerciseInput, ExerciseQuery, ExerciseWithUsage, SetInput,
    ShealthExercise, SyncReport, WorkoutInput, WorkoutSetWithExercise, WorkoutWithSets,
};
use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::{str::FromStr, time::Duration};
use tracing::info;

type Reply<T> = RpcReplyPort<Result<T, IronlogError>>;

#[derive(Debug)]
pub enum DbActorMessage {
    /// Exercise library with usage counts, filtered and ordered by name.
    ListExercises(ExerciseQuery, Reply<Vec<ExerciseWithUsage>>),
    /// Exercise plus recent sets and total set count.
    GetExercise(String, Reply<ExerciseDetail>),
    CreateExercise(ExerciseInput, Reply<Exercise>),
    UpdateExercise(String, ExerciseInput, Reply<Exercise>),
    DeleteExercise(String, Reply<()>),
    /// Upsert the built-in catalog; replies with the number of rows written.
    SeedBuiltins(Reply<usize>),

    ListWorkouts(WorkoutFilter, Reply<Vec<WorkoutWithSets>>),
    GetWorkout(i64, Reply<WorkoutWithSets>),
    CreateWorkout(WorkoutInput, Reply<WorkoutWithSets>),
    ReplaceWorkout(i64, WorkoutInput, Reply<WorkoutWithSets>),
    DeleteWorkout(i64, Reply<()>),
    AddSet(i64, SetInput, Reply<WorkoutSetWithExercise>),
    /// (workout id, set id)
    RemoveSet(i64, i64, Reply<()>),

    GetSyncToken(Reply<Option<SyncToken>>),
    SaveSyncToken(SyncToken, Reply<()>),
    DeleteSyncToken(Reply<bool>),
    /// Apply one vendor batch atomically. One message per sync keeps overlapping syncs apart.
    Reconcile(Vec<ShealthExercise>, DateTime<Utc>, Reply<SyncReport>),
}

#[derive(Clone)]
pub struct DbActorHandle {
    actor: ActorRef<DbActorMessage>,
}

impl DbActorHandle {
    pub async fn list_exercises(
        &self,
        query: ExerciseQuery,
    ) -> Result<Vec<ExerciseWithUsage>, IronlogError> {
        ractor::call!(self.actor, DbActorMessage::ListExercises, query).map_err(|e| {
            IronlogError::RactorError(format!("DbActor ListExercises RPC failed: {e}"))
        })?
    }

    pub async fn get_exercise(&self, id: String) -> Result<ExerciseDetail, IronlogError> {
        ractor::call!(self.actor, DbActorMessage::GetExercise, id).map_err(|e| {
            IronlogError::RactorError(format!("DbActor GetExercise RPC failed: {e}"))
        })?
    }

    pub async fn create_exercise(&self, input: ExerciseInput) -> Result<Exercise, IronlogError> {
        ractor::call!(self.actor, DbActorMessage::CreateExercise, input).map_err(|e| {
            IronlogError::RactorError(format!("DbActor CreateExercise RPC failed: {e}"))
        })?
    }

    pub async fn update_exercise(
        &self,
        id: String,
        input: ExerciseInput,
    ) -> Result<Exercise, IronlogError> {
        ractor::call!(self.actor, DbActorMessage::UpdateExercise, id, input).map_err(|e| {
            IronlogError::RactorError(format!("DbActor UpdateExercise RPC failed: {e}"))
        })?
    }

    pub async fn delete_exercise(&self, id: String) -> Result<(), IronlogError> {
        ractor::call!(self.actor, DbActorMessage::DeleteExercise, id).map_err(|e| {
            IronlogError::RactorError(format!("DbActor DeleteExercise RPC failed: {e}"))
        })?
    }

    pub async fn seed_builtins(&self) -> Result<usize, IronlogError> {
        ractor::call!(self.actor, DbActorMessage::SeedBuiltins).map_err(|e| {
            IronlogError::RactorError(format!("DbActor SeedBuiltins RPC failed: {e}"))
        })?
    }

    pub async fn list_workouts(
        &self,
        filter: WorkoutFilter,
    ) -> Result<Vec<WorkoutWithSets>, IronlogError> {
        ractor::call!(self.actor, DbActorMessage::ListWorkouts, filter).map_err(|e| {
            IronlogError::RactorError(format!("DbActor ListWorkouts RPC failed: {e}"))
        })?
    }

    pub async fn get_workout(&self, id: i64) -> Result<WorkoutWithSets, IronlogError> {
        ractor::call!(self.actor, DbActorMessage::GetWorkout, id)
            .map_err(|e| IronlogError::RactorError(format!("DbActor GetWorkout RPC failed: {e}")))?
    }

    pub async fn create_workout(
        &self,
        input: WorkoutInput,
    ) -> Result<WorkoutWithSets, IronlogError> {
        ractor::call!(self.actor, DbActorMessage::CreateWorkout, input).map_err(|e| {
            IronlogError::RactorError(format!("DbActor CreateWorkout RPC failed: {e}"))
        })?
    }

    pub async fn replace_workout(
        &self,
        id: i64,
        input: WorkoutInput,
    ) -> Result<WorkoutWithSets, IronlogError> {
        ractor::call!(self.actor, DbActorMessage::ReplaceWorkout, id, input).map_err(|e| {
            IronlogError::RactorError(format!("DbActor ReplaceWorkout RPC failed: {e}"))
        })?
    }

    pub async fn delete_workout(&self, id: i64) -> Result<(), IronlogError> {
        ractor::call!(self.actor, DbActorMessage::DeleteWorkout, id).map_err(|e| {
            IronlogError::RactorError(format!("DbActor DeleteWorkout RPC failed: {e}"))
        })?
    }

    pub async fn add_set(
        &self,
        workout_id: i64,
        set: SetInput,
    ) -> Result<WorkoutSetWithExercise, IronlogError> {
        ractor::call!(self.actor, DbActorMessage::AddSet, workout_id, set)
            .map_err(|e| IronlogError::RactorError(format!("DbActor AddSet RPC failed: {e}")))?
    }

    pub async fn remove_set(&self, workout_id: i64, set_id: i64) -> Result<(), IronlogError> {
        ractor::call!(self.actor, DbActorMessage::RemoveSet, workout_id, set_id)
            .map_err(|e| IronlogError::RactorError(format!("DbActor RemoveSet RPC failed: {e}")))?
    }

    pub async fn get_sync_token(&self) -> Result<Option<SyncToken>, IronlogError> {
        ractor::call!(self.actor, DbActorMessage::GetSyncToken).map_err(|e| {
            IronlogError::RactorError(format!("DbActor GetSyncToken RPC failed: {e}"))
        })?
    }

    pub async fn save_sync_token(&self, token: SyncToken) -> Result<(), IronlogError> {
        ractor::call!(self.actor, DbActorMessage::SaveSyncToken, token).map_err(|e| {
            IronlogError::RactorError(format!("DbActor SaveSyncToken RPC failed: {e}"))
        })?
    }

    pub async fn delete_sync_token(&self) -> Result<bool, IronlogError> {
        ractor::call!(self.actor, DbActorMessage::DeleteSyncToken).map_err(|e| {
            IronlogError::RactorError(format!("DbActor DeleteSyncToken RPC failed: {e}"))
        })?
    }

    pub async fn reconcile(
        &self,
        records: Vec<ShealthExercise>,
        now: DateTime<Utc>,
    ) -> Result<SyncReport, IronlogError> {
        ractor::call!(self.actor, DbActorMessage::Reconcile, records, now)
            .map_err(|e| IronlogError::RactorError(format!("DbActor Reconcile RPC failed: {e}")))?
    }
}

struct DbActorState {
    pool: SqlitePool,
}

struct DbActor;

#[ractor::async_trait]
impl Actor for DbActor {
    type Msg = DbActorMessage;
    type State = DbActorState;
    type Arguments = String;

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        database_url: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        let connect_opts = SqliteConnectOptions::from_str(database_url.as_str())
            .map_err(|e| ActorProcessingErr::from(format!("invalid database url: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5))
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .connect_with(connect_opts)
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db connect failed: {e}")))?;

        apply_schema(&pool)
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db schema init failed: {e}")))?;

        info!("DbActor initialized");
        Ok(DbActorState { pool })
    }

    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        let pool = &state.pool;
        match message {
            DbActorMessage::ListExercises(query, reply) => {
                let _ = reply.send(exercises::list(pool, &query).await);
            }
            DbActorMessage::GetExercise(id, reply) => {
                let _ = reply.send(exercises::detail(pool, &id).await);
            }
            DbActorMessage::CreateExercise(input, reply) => {
                let _ = reply.send(exercises::create(pool, input).await);
            }
            DbActorMessage::UpdateExercise(id, input, reply) => {
                let _ = reply.send(exercises::update(pool, &id, input).await);
            }
            DbActorMessage::DeleteExercise(id, reply) => {
                let _ = reply.send(exercises::delete(pool, &id).await);
            }
            DbActorMessage::SeedBuiltins(reply) => {
                let _ = reply.send(exercises::seed_builtins(pool).await);
            }
            DbActorMessage::ListWorkouts(filter, reply) => {
                let _ = reply.send(workouts::list(pool, &filter).await);
            }
            DbActorMessage::GetWorkout(id, reply) => {
                let _ = reply.send(workouts::get(pool, id).await);
            }
            DbActorMessage::CreateWorkout(input, reply) => {
                let _ = reply.send(workouts::create(pool, input).await);
            }
            DbActorMessage::ReplaceWorkout(id, input, reply) => {
                let _ = reply.send(workouts::replace(pool, id, input).await);
            }
            DbActorMessage::DeleteWorkout(id, reply) => {
                let _ = reply.send(workouts::delete(pool, id).await);
            }
            DbActorMessage::AddSet(workout_id, set, reply) => {
                let _ = reply.send(workouts::add_set(pool, workout_id, set).await);
            }
            DbActorMessage::RemoveSet(workout_id, set_id, reply) => {
                let _ = reply.send(workouts::remove_set(pool, workout_id, set_id).await);
            }
            DbActorMessage::GetSyncToken(reply) => {
                let _ = reply.send(sync::get_token(pool).await);
            }
            DbActorMessage::SaveSyncToken(token, reply) => {
                let _ = reply.send(sync::save_token(pool, token).await);
            }
            DbActorMessage::DeleteSyncToken(reply) => {
                let _ = reply.send(sync::delete_token(pool).await);
            }
            DbActorMessage::Reconcile(records, now, reply) => {
                let _ = reply.send(sync::reconcile_batch(pool, &records, now).await);
            }
        }
        Ok(())
    }
}

/// Spawn the database actor and return a cloneable handle.
///
/// The actor is unnamed so several databases (one per test) can live in one process.
pub async fn spawn(database_url: &str) -> Result<DbActorHandle, IronlogError> {
    let (actor, _jh) = Actor::spawn(None, DbActor, database_url.to_string())
        .await
        .map_err(|e| IronlogError::RactorError(format!("failed to spawn DbActor: {e}")))?;

    Ok(DbActorHandle { actor })
}

async fn apply_schema(pool: &SqlitePool) -> Result<(), IronlogError> {
    for stmt in SQLITE_INIT.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s).execute(pool).await?;
    }
    Ok(())
}

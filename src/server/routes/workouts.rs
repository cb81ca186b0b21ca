use crate::db::WorkoutFilter;
use crate::error::IronlogError;
use crate::server::router::IronlogState;
use crate::workout::{parse_date_bound, validate_set_input, validate_workout_input};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use ironlog_schema::{SetInput, WorkoutInput, WorkoutQuery};
use tracing::debug;

/// GET /api/workouts
///
/// Newest first. `from`/`to` are inclusive calendar dates.
pub async fn list_workouts(
    State(state): State<IronlogState>,
    query: Result<Query<WorkoutQuery>, QueryRejection>,
) -> Result<impl IntoResponse, IronlogError> {
    let Query(query) = query?;
    let filter = WorkoutFilter {
        workout_type: query.workout_type,
        from: query
            .from
            .as_deref()
            .map(|raw| parse_date_bound("from", raw))
            .transpose()?,
        to: query
            .to
            .as_deref()
            .map(|raw| parse_date_bound("to", raw))
            .transpose()?,
        limit: query.limit,
        ascending: false,
    };
    debug!(?filter, "listing workouts");
    Ok(Json(state.db.list_workouts(filter).await?))
}

/// GET /api/workouts/{id}
pub async fn get_workout(
    State(state): State<IronlogState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, IronlogError> {
    let Path(id) = id?;
    Ok(Json(state.db.get_workout(id).await?))
}

/// POST /api/workouts
pub async fn create_workout(
    State(state): State<IronlogState>,
    payload: Result<Json<WorkoutInput>, JsonRejection>,
) -> Result<impl IntoResponse, IronlogError> {
    let Json(input) = payload?;
    validate_workout_input(&input)?;
    let created = state.db.create_workout(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/workouts/{id}
///
/// Replaces the workout fields and its whole set list.
pub async fn replace_workout(
    State(state): State<IronlogState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<WorkoutInput>, JsonRejection>,
) -> Result<impl IntoResponse, IronlogError> {
    let Path(id) = id?;
    let Json(input) = payload?;
    validate_workout_input(&input)?;
    Ok(Json(state.db.replace_workout(id, input).await?))
}

/// DELETE /api/workouts/{id}
pub async fn delete_workout(
    State(state): State<IronlogState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, IronlogError> {
    let Path(id) = id?;
    state.db.delete_workout(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/workouts/{id}/sets
pub async fn add_set(
    State(state): State<IronlogState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<SetInput>, JsonRejection>,
) -> Result<impl IntoResponse, IronlogError> {
    let Path(workout_id) = id?;
    let Json(set) = payload?;
    validate_set_input(&set).map_err(IronlogError::Validation)?;
    let created = state.db.add_set(workout_id, set).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// DELETE /api/workouts/{id}/sets/{set_id}
pub async fn remove_set(
    State(state): State<IronlogState>,
    ids: Result<Path<(i64, i64)>, PathRejection>,
) -> Result<impl IntoResponse, IronlogError> {
    let Path((workout_id, set_id)) = ids?;
    state.db.remove_set(workout_id, set_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

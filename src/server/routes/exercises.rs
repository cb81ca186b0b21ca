use crate::error::IronlogError;
use crate::exercise::normalize_input;
use crate::server::router::IronlogState;
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use ironlog_schema::{ExerciseInput, ExerciseQuery};

/// GET /api/exercises
pub async fn list_exercises(
    State(state): State<IronlogState>,
    query: Result<Query<ExerciseQuery>, QueryRejection>,
) -> Result<impl IntoResponse, IronlogError> {
    let Query(query) = query?;
    Ok(Json(state.db.list_exercises(query).await?))
}

/// GET /api/exercises/{id}
pub async fn get_exercise(
    State(state): State<IronlogState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, IronlogError> {
    let Path(id) = id?;
    Ok(Json(state.db.get_exercise(id).await?))
}

/// POST /api/exercises
pub async fn create_exercise(
    State(state): State<IronlogState>,
    payload: Result<Json<ExerciseInput>, JsonRejection>,
) -> Result<impl IntoResponse, IronlogError> {
    let Json(input) = payload?;
    let created = state.db.create_exercise(normalize_input(input)?).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/exercises/{id}
pub async fn update_exercise(
    State(state): State<IronlogState>,
    id: Result<Path<String>, PathRejection>,
    payload: Result<Json<ExerciseInput>, JsonRejection>,
) -> Result<impl IntoResponse, IronlogError> {
    let Path(id) = id?;
    let Json(input) = payload?;
    Ok(Json(
        state.db.update_exercise(id, normalize_input(input)?).await?,
    ))
}

/// DELETE /api/exercises/{id}
pub async fn delete_exercise(
    State(state): State<IronlogState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, IronlogError> {
    let Path(id) = id?;
    state.db.delete_exercise(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

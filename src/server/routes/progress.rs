use crate::db::WorkoutFilter;
use crate::error::IronlogError;
use crate::progress::{aggregate, period_start, summarize};
use crate::server::router::IronlogState;
use crate::workout::parse_date_bound;
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    response::IntoResponse,
};
use chrono::Utc;
use ironlog_schema::{ProgressQuery, StatsQuery};

/// GET /api/progress
pub async fn progress(
    State(state): State<IronlogState>,
    query: Result<Query<ProgressQuery>, QueryRejection>,
) -> Result<impl IntoResponse, IronlogError> {
    let Query(query) = query?;
    let today = Utc::now().date_naive();
    let filter = WorkoutFilter {
        from: Some(period_start(today, query.period.unwrap_or(0))),
        ascending: true,
        ..WorkoutFilter::default()
    };

    let workouts = state.db.list_workouts(filter).await?;
    Ok(Json(aggregate(&workouts, query.exercise_id.as_deref())))
}

/// GET /api/stats
///
/// Dashboard totals over an optional inclusive date window (all history when unbounded).
pub async fn stats(
    State(state): State<IronlogState>,
    query: Result<Query<StatsQuery>, QueryRejection>,
) -> Result<impl IntoResponse, IronlogError> {
    let Query(query) = query?;
    let filter = WorkoutFilter {
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
        ascending: true,
        ..WorkoutFilter::default()
    };

    let workouts = state.db.list_workouts(filter).await?;
    Ok(Json(summarize(&workouts)))
}

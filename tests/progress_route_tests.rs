use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use chrono::{Days, Months, NaiveDate, Utc};
use serde_json::{Value, json};
use std::{
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};
use tower::ServiceExt;

fn unique_sqlite_path(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut temp_path = std::env::temp_dir();
    temp_path.push(format!(
        "ironlog-{prefix}-{}-{}.sqlite",
        std::process::id(),
        nanos
    ));
    temp_path
}

async fn build_app(prefix: &str) -> Router {
    let temp_path = unique_sqlite_path(prefix);
    let database_url = format!("sqlite:{}", temp_path.display());
    let db = ironlog::db::spawn(&database_url)
        .await
        .expect("spawn db actor");

    let state = ironlog::server::IronlogState::new(
        db,
        ironlog::config::SyncConfig::default().resolve(),
        None,
        true,
        "/settings/integrations",
    );
    let app = ironlog::server::ironlog_router(state);

    for (name, primary) in [("Bench", "CHEST"), ("Run", "CARDIO")] {
        let (status, _) = send(
            &app,
            "POST",
            "/api/exercises",
            Some(json!({ "name": name, "primaryMuscleGroup": primary })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }
    app
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header("content-type", "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let resp = app
        .clone()
        .oneshot(builder.body(body).expect("build request"))
        .await
        .expect("request failed");

    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body was not JSON")
    };
    (status, json)
}

async fn log_workout(app: &Router, date: NaiveDate, workout_type: &str, sets: Value) {
    let body = json!({
        "date": date,
        "startTime": format!("{date}T10:00:00Z"),
        "endTime": format!("{date}T11:00:00Z"),
        "type": workout_type,
        "sets": sets
    });
    let (status, _) = send(app, "POST", "/api/workouts", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
}

fn label(date: NaiveDate) -> String {
    date.format("%d.%m").to_string()
}

#[tokio::test]
async fn progress_aggregates_weeks_types_and_one_exercise() {
    let app = build_app("progress").await;
    let today = Utc::now().date_naive();
    let last_week = today - Days::new(7);
    let long_ago = today - Months::new(5);

    log_workout(
        &app,
        last_week,
        "STRENGTH",
        json!([
            { "exerciseId": "bench", "reps": 10, "weight": 50.0 },
            { "exerciseId": "bench", "reps": 8 }
        ]),
    )
    .await;
    log_workout(
        &app,
        today,
        "STRENGTH",
        json!([
            { "exerciseId": "bench", "reps": 5, "weight": 70.0 },
            { "exerciseId": "bench", "reps": 6, "weight": 65.0 }
        ]),
    )
    .await;
    log_workout(
        &app,
        today,
        "CARDIO",
        json!([{ "exerciseId": "run", "duration": 1800, "calories": 300.0 }]),
    )
    .await;
    log_workout(
        &app,
        long_ago,
        "STRETCHING",
        json!([]),
    )
    .await;

    let (status, report) = send(&app, "GET", "/api/progress", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["totalWorkouts"], 3);
    assert_eq!(
        report["volumeData"],
        json!([
            { "date": label(ironlog::progress::week_start(last_week)), "volume": 500.0 },
            { "date": label(ironlog::progress::week_start(today)), "volume": 740.0 }
        ])
    );
    assert_eq!(report["frequencyData"][0]["count"], 1);
    assert_eq!(report["frequencyData"][1]["count"], 2);
    assert_eq!(
        report["typeData"],
        json!([{ "type": "STRENGTH", "count": 2 }, { "type": "CARDIO", "count": 1 }])
    );
    assert_eq!(report["exerciseProgress"], json!([]));

    let (_, report) = send(&app, "GET", "/api/progress?period=6&exerciseId=bench", None).await;
    assert_eq!(report["totalWorkouts"], 4);
    assert_eq!(
        report["exerciseProgress"],
        json!([
            { "date": label(last_week), "maxWeight": 50.0, "maxReps": 10, "volume": 500.0 },
            { "date": label(today), "maxWeight": 70.0, "maxReps": 6, "volume": 740.0 }
        ])
    );

    let (status, _) = send(&app, "GET", "/api/progress?period=soon", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn progress_window_includes_its_first_day() {
    let app = build_app("progress-boundary").await;
    let today = Utc::now().date_naive();
    let first_day = ironlog::progress::period_start(today, 1);

    log_workout(&app, first_day, "STRENGTH", json!([])).await;
    log_workout(&app, first_day - Days::new(1), "CARDIO", json!([])).await;

    let (status, report) = send(&app, "GET", "/api/progress?period=1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["totalWorkouts"], 1);
    assert_eq!(report["typeData"], json!([{ "type": "STRENGTH", "count": 1 }]));
}

#[tokio::test]
async fn progress_on_empty_store_is_empty() {
    let app = build_app("progress-empty").await;

    let (status, report) = send(&app, "GET", "/api/progress?period=1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        report,
        json!({
            "volumeData": [],
            "frequencyData": [],
            "typeData": [],
            "exerciseProgress": [],
            "totalWorkouts": 0
        })
    );
}

#[tokio::test]
async fn stats_cover_window_or_all_history() {
    let app = build_app("stats").await;
    let day = |d: u32| NaiveDate::from_ymd_opt(2026, 3, d).expect("valid date");

    log_workout(
        &app,
        day(2),
        "STRENGTH",
        json!([{ "exerciseId": "bench", "reps": 10, "weight": 50.0, "calories": 40.0 }]),
    )
    .await;
    log_workout(
        &app,
        day(4),
        "CARDIO",
        json!([{ "exerciseId": "run", "duration": 1800, "calories": 310.5 }]),
    )
    .await;
    log_workout(&app, day(9), "MIXED", json!([])).await;

    let (status, stats) = send(&app, "GET", "/api/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["totalWorkouts"], 3);
    assert_eq!(stats["calorieVolume"], 350.5);
    assert_eq!(stats["totalDurationSecs"], 3 * 3600);
    assert_eq!(
        stats["workoutsByType"],
        json!([
            { "type": "STRENGTH", "count": 1 },
            { "type": "CARDIO", "count": 1 },
            { "type": "STRETCHING", "count": 0 },
            { "type": "MIXED", "count": 1 }
        ])
    );

    let (_, window) = send(&app, "GET", "/api/stats?from=2026-03-03&to=2026-03-08", None).await;
    assert_eq!(window["totalWorkouts"], 1);
    assert_eq!(window["calorieVolume"], 310.5);

    let (status, _) = send(&app, "GET", "/api/stats?to=03/08/2026", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

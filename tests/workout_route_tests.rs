use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
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
    db.seed_builtins().await.expect("seed built-in exercises");

    let state = ironlog::server::IronlogState::new(
        db,
        ironlog::config::SyncConfig::default().resolve(),
        None,
        true,
        "/settings/integrations",
    );
    let app = ironlog::server::ironlog_router(state);

    for (name, primary) in [("Bench", "CHEST"), ("Squat", "LEGS"), ("Rower", "CARDIO")] {
        let (status, _) = send(
            &app,
            "POST",
            "/api/exercises",
            Some(json!({ "name": name, "primaryMuscleGroup": primary })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "failed to create {name}");
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

fn set_numbers(workout: &Value, exercise_id: &str) -> Vec<i64> {
    workout["sets"]
        .as_array()
        .expect("sets array")
        .iter()
        .filter(|s| s["exerciseId"] == exercise_id)
        .map(|s| s["setNumber"].as_i64().expect("setNumber"))
        .collect()
}

fn strength_workout(date: &str) -> Value {
    json!({
        "date": date,
        "startTime": format!("{date}T18:00:00Z"),
        "endTime": format!("{date}T19:00:00Z"),
        "type": "STRENGTH",
        "notes": "push day",
        "sets": [
            { "exerciseId": "bench", "setNumber": 2, "reps": 8, "weight": 62.5 },
            { "exerciseId": "squat", "reps": 5, "weight": 100.0 },
            { "exerciseId": "bench", "setNumber": 1, "reps": 10, "weight": 60.0 },
            { "exerciseId": "bench", "setNumber": 7, "reps": 6, "weight": 65.0 }
        ]
    })
}

#[tokio::test]
async fn create_workout_numbers_sets_per_exercise() {
    let app = build_app("workout-create").await;

    let (status, created) = send(&app, "POST", "/api/workouts", Some(strength_workout("2026-03-02"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["type"], "STRENGTH");
    assert_eq!(created["source"], "MANUAL");
    assert_eq!(created["notes"], "push day");
    assert_eq!(created["sets"].as_array().unwrap().len(), 4);
    assert_eq!(set_numbers(&created, "bench"), vec![2, 1, 3]);
    assert_eq!(set_numbers(&created, "squat"), vec![1]);

    // The hinted order survives: set 1 is the 60 kg one.
    let first_bench = created["sets"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["exerciseId"] == "bench" && s["setNumber"] == 1)
        .expect("bench set 1");
    assert_eq!(first_bench["weight"], 60.0);
    assert_eq!(first_bench["exercise"]["name"], "Bench");

    let id = created["id"].as_i64().unwrap();
    let (status, fetched) = send(&app, "GET", &format!("/api/workouts/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn add_and_remove_sets_keep_numbering_dense() {
    let app = build_app("workout-sets").await;

    let (_, created) = send(&app, "POST", "/api/workouts", Some(strength_workout("2026-03-02"))).await;
    let id = created["id"].as_i64().unwrap();

    let (status, added) = send(
        &app,
        "POST",
        &format!("/api/workouts/{id}/sets"),
        Some(json!({ "exerciseId": "bench", "reps": 4, "weight": 70.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(added["setNumber"], 4);
    assert_eq!(added["workoutId"], id);

    let middle = created["sets"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["exerciseId"] == "bench" && s["setNumber"] == 2)
        .and_then(|s| s["id"].as_i64())
        .expect("bench set 2");
    let (status, _) = send(&app, "DELETE", &format!("/api/workouts/{id}/sets/{middle}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, after) = send(&app, "GET", &format!("/api/workouts/{id}"), None).await;
    let mut bench = set_numbers(&after, "bench");
    bench.sort_unstable();
    assert_eq!(bench, vec![1, 2, 3]);
    assert_eq!(set_numbers(&after, "squat"), vec![1]);

    let (status, _) = send(&app, "DELETE", &format!("/api/workouts/{id}/sets/{middle}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/workouts/{id}/sets"),
        Some(json!({ "exerciseId": "no-such-exercise", "reps": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_REQUEST");

    let (status, _) = send(
        &app,
        "POST",
        "/api/workouts/9999/sets",
        Some(json!({ "exerciseId": "bench", "reps": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn replace_and_delete_workout() {
    let app = build_app("workout-replace").await;

    let (_, created) = send(&app, "POST", "/api/workouts", Some(strength_workout("2026-03-02"))).await;
    let id = created["id"].as_i64().unwrap();

    let replacement = json!({
        "date": "2026-03-03",
        "startTime": "2026-03-03T07:00:00Z",
        "type": "CARDIO",
        "calories": 320.0,
        "sets": [{ "exerciseId": "rower", "duration": 1200, "distance": 4.5 }]
    });
    let (status, replaced) = send(&app, "PUT", &format!("/api/workouts/{id}"), Some(replacement)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(replaced["id"], id);
    assert_eq!(replaced["type"], "CARDIO");
    assert_eq!(replaced["date"], "2026-03-03");
    assert_eq!(replaced["notes"], Value::Null);
    assert_eq!(replaced["sets"].as_array().unwrap().len(), 1);
    assert_eq!(replaced["sets"][0]["setNumber"], 1);

    let (status, _) = send(&app, "DELETE", &format!("/api/workouts/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, "GET", &format!("/api/workouts/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");

    let (status, _) = send(&app, "DELETE", &format!("/api/workouts/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Sets went with the workout, so the exercise can be deleted now.
    let (status, _) = send(&app, "DELETE", "/api/exercises/rower", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn list_workouts_filters_and_orders_newest_first() {
    let app = build_app("workout-list").await;

    for date in ["2026-03-02", "2026-03-05", "2026-03-09"] {
        let (status, _) = send(&app, "POST", "/api/workouts", Some(strength_workout(date))).await;
        assert_eq!(status, StatusCode::CREATED);
    }
    let cardio = json!({
        "date": "2026-03-06",
        "startTime": "2026-03-06T07:00:00Z",
        "type": "CARDIO",
        "sets": []
    });
    send(&app, "POST", "/api/workouts", Some(cardio)).await;

    let (status, all) = send(&app, "GET", "/api/workouts", None).await;
    assert_eq!(status, StatusCode::OK);
    let dates: Vec<&str> = all
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, vec!["2026-03-09", "2026-03-06", "2026-03-05", "2026-03-02"]);

    let (_, strength) = send(&app, "GET", "/api/workouts?type=STRENGTH&from=2026-03-03&to=2026-03-09", None).await;
    let dates: Vec<&str> = strength
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, vec!["2026-03-09", "2026-03-05"]);

    let (_, limited) = send(&app, "GET", "/api/workouts?limit=1", None).await;
    assert_eq!(limited.as_array().unwrap().len(), 1);

    let (status, _) = send(&app, "GET", "/api/workouts?from=yesterday", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn invalid_workouts_are_rejected() {
    let app = build_app("workout-invalid").await;

    let backwards = json!({
        "date": "2026-03-02",
        "startTime": "2026-03-02T18:00:00Z",
        "endTime": "2026-03-02T17:00:00Z",
        "type": "STRENGTH"
    });
    let (status, body) = send(&app, "POST", "/api/workouts", Some(backwards)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_REQUEST");

    let negative = json!({
        "date": "2026-03-02",
        "startTime": "2026-03-02T18:00:00Z",
        "type": "STRENGTH",
        "sets": [{ "exerciseId": "bench", "reps": -1 }]
    });
    let (status, _) = send(&app, "POST", "/api/workouts", Some(negative)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let unknown_type = json!({
        "date": "2026-03-02",
        "startTime": "2026-03-02T18:00:00Z",
        "type": "YOGA"
    });
    let (status, _) = send(&app, "POST", "/api/workouts", Some(unknown_type)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "GET", "/api/workouts/not-a-number", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Nothing was written by the rejected requests.
    let (_, all) = send(&app, "GET", "/api/workouts", None).await;
    assert_eq!(all, json!([]));
}

#[tokio::test]
async fn manual_external_id_must_be_unique() {
    let app = build_app("workout-external-id").await;

    let body = json!({
        "date": "2026-03-02",
        "startTime": "2026-03-02T07:00:00Z",
        "type": "CARDIO",
        "source": "EXTERNAL_SYNC",
        "externalId": "ext-1"
    });
    let (status, first) = send(&app, "POST", "/api/workouts", Some(body.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["externalId"], "ext-1");

    let (status, dup) = send(&app, "POST", "/api/workouts", Some(body)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(dup["error"]["code"], "CONFLICT");

    let (status, _) = send(
        &app,
        "POST",
        "/api/workouts",
        Some(json!({
            "date": "2026-03-02",
            "startTime": "2026-03-02T07:00:00Z",
            "type": "CARDIO",
            "source": "EXTERNAL_SYNC"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_routes_return_json_404_with_request_id() {
    let app = build_app("workout-fallback").await;

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/nope")
                .header("x-request-id", "req-123")
                .body(Body::empty())
                .expect("build request"),
        )
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        resp.headers().get("x-request-id").and_then(|v| v.to_str().ok()),
        Some("req-123")
    );
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.expect("read body");
    let body: Value = serde_json::from_slice(&bytes).expect("404 body must be JSON");
    assert_eq!(body["error"]["code"], "NOT_FOUND");

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/healthz")
                .body(Body::empty())
                .expect("build request"),
        )
        .await
        .expect("request failed");
    let generated = resp
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .expect("generated request id");
    assert_eq!(generated.len(), 16);
}

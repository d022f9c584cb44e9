//! Router tests driving the full middleware stack in process.
//!
//! Each test writes a fixture CSV, loads it the way the binary does, and sends
//! requests through `tower::ServiceExt::oneshot`.
//!
//! Run with: cargo test --test api_tests
use std::io::Write;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use stress_api::config::{AppConfig, CACHE_CONTROL_DATA, DEFAULT_STRESS_COLUMN};
use stress_api::dataset::{load_table, DatasetError};
use stress_api::{create_router, AppState};

const SCENARIO_CSV: &str = "age,stress_col\n22,high\n31,low\n";

fn write_csv(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn app_with(contents: &str, stress_column: &str) -> Router {
    let file = write_csv(contents);
    let table = load_table(file.path()).unwrap();
    let mut config = AppConfig::default();
    config.dataset.stress_column = stress_column.to_string();
    create_router(AppState::new(config, table))
}

async fn send(app: &Router, method: Method, uri: &str) -> (StatusCode, Option<String>, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let cache_control = response
        .headers()
        .get(header::CACHE_CONTROL)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, cache_control, serde_json::from_slice(&bytes).unwrap())
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, _, body) = send(app, Method::GET, uri).await;
    (status, body)
}

#[tokio::test]
async fn test_health() {
    let app = app_with(SCENARIO_CSV, "stress_col");
    let (status, cache_control, body) = send(&app, Method::GET, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
    assert!(cache_control.is_none());
}

#[tokio::test]
async fn test_full_dataset_scenario() {
    let app = app_with(SCENARIO_CSV, "stress_col");
    let (status, cache_control, body) = send(&app, Method::GET, "/data/full").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{"age": 22, "stress_col": "high"}, {"age": 31, "stress_col": "low"}])
    );
    assert_eq!(cache_control.as_deref(), Some(CACHE_CONTROL_DATA));
}

#[tokio::test]
async fn test_stress_projection_scenario() {
    let app = app_with(SCENARIO_CSV, "stress_col");
    let (status, body) = get(&app, "/data/stress").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{"id": 1, "stress_col": "high"}, {"id": 2, "stress_col": "low"}])
    );
}

#[tokio::test]
async fn test_stress_missing_column_reports_error() {
    let app = app_with(SCENARIO_CSV, DEFAULT_STRESS_COLUMN);
    let (status, body) = get(&app, "/data/stress").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"error": format!("Column '{}' not found in dataset.", DEFAULT_STRESS_COLUMN)})
    );

    // The failure is per request; other endpoints keep working
    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_row_counts_and_dense_ids() {
    let mut csv = String::from("Timestamp,Which type of stress do you primarily experience?,Age\n");
    for i in 0..25 {
        let kind = if i % 2 == 0 { "Eustress" } else { "Distress" };
        csv.push_str(&format!("t{},{},{}\n", i, kind, 18 + i));
    }
    let app = app_with(&csv, DEFAULT_STRESS_COLUMN);

    let (_, full) = get(&app, "/data/full").await;
    let full = full.as_array().unwrap();
    assert_eq!(full.len(), 25);
    for row in full {
        let keys: Vec<&String> = row.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 3);
        assert!(row.get("Timestamp").is_some());
        assert!(row.get(DEFAULT_STRESS_COLUMN).is_some());
        assert!(row.get("Age").is_some());
    }

    let (_, stress) = get(&app, "/data/stress").await;
    let stress = stress.as_array().unwrap();
    assert_eq!(stress.len(), full.len());
    for (i, record) in stress.iter().enumerate() {
        assert_eq!(record["id"], json!(i + 1));
        assert_eq!(record[DEFAULT_STRESS_COLUMN], full[i][DEFAULT_STRESS_COLUMN]);
        assert_eq!(record.as_object().unwrap().len(), 2);
    }
}

#[tokio::test]
async fn test_repeated_calls_are_identical() {
    let app = app_with(SCENARIO_CSV, "stress_col");
    for uri in ["/health", "/data/full", "/data/stress"] {
        let first = get(&app, uri).await;
        let second = get(&app, uri).await;
        assert_eq!(first, second, "{} changed between calls", uri);
    }
}

#[tokio::test]
async fn test_duplicate_columns_keep_all_values() {
    let app = app_with("a,a\n1,2\n", "a");
    let (status, body) = get(&app, "/data/full").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"a": 1, "a.1": 2}]));

    let (_, body) = get(&app, "/data/stress").await;
    assert_eq!(body, json!([{"id": 1, "a": 1}]));
}

#[tokio::test]
async fn test_empty_dataset() {
    let app = app_with("age,stress_col\n", "stress_col");
    assert_eq!(get(&app, "/data/full").await.1, json!([]));
    assert_eq!(get(&app, "/data/stress").await.1, json!([]));
}

#[tokio::test]
async fn test_openapi_document() {
    let app = app_with(SCENARIO_CSV, "stress_col");
    let (status, body) = get(&app, "/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["info"]["title"], "Stress Dataset API");
    assert!(body["paths"]["/data/stress"].is_object());
}

#[tokio::test]
async fn test_unknown_route() {
    let app = app_with(SCENARIO_CSV, "stress_col");
    let (status, body) = get(&app, "/data/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"detail": "Not Found"}));
}

#[tokio::test]
async fn test_wrong_method() {
    let app = app_with(SCENARIO_CSV, "stress_col");
    let (status, _, body) = send(&app, Method::POST, "/data/full").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body, json!({"detail": "Method Not Allowed"}));
}

#[test]
fn test_missing_dataset_names_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data").join("stress_dataset.csv");
    let err = load_table(&path).unwrap_err();
    assert!(matches!(err, DatasetError::NotFound { .. }));
    assert_eq!(
        err.to_string(),
        format!("Dataset not found at {}. Make sure it exists.", path.display())
    );
}

#[test]
fn test_config_file_drives_dataset_settings() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("stress-api.toml");
    std::fs::write(
        &config_path,
        "[dataset]\npath = \"fixtures/data.csv\"\nstress_column = \"stress_col\"\n",
    )
    .unwrap();
    std::fs::create_dir_all(dir.path().join("fixtures")).unwrap();
    std::fs::write(dir.path().join("fixtures/data.csv"), SCENARIO_CSV).unwrap();

    let config = AppConfig::load_or_default(&config_path, true).unwrap();
    let path = config.dataset.resolve_path(dir.path());
    let table = load_table(&path).unwrap();
    assert_eq!(table.len(), 2);
    assert!(table.stress_records(&config.dataset.stress_column).is_some());
}

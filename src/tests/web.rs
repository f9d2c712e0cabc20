// tests/web.rs
use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt; // for .oneshot()

use crate::app_state::AppState;
use crate::config_loader::AppConfig;
use crate::dataset::MovieRecord;
use crate::web::{build_router, DATASET_MARKER};

fn sample_records(count: usize) -> Vec<MovieRecord> {
    (0..count)
        .map(|i| MovieRecord {
            text: format!("Movie {i}"),
            sentiment: 0.1 * i as f64,
            valence: 0.5,
            arousal: 0.5,
            dominance: 0.5,
            tempo: 100.0,
        })
        .collect()
}

/// Router plus state backed by a temp dir holding the HTML template.
fn test_app(dataset: Option<Vec<MovieRecord>>) -> (Router, Arc<AppState>, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let index_path = dir.path().join("index.html");
    std::fs::write(
        &index_path,
        format!("<html><body><script>const data = {DATASET_MARKER};</script></body></html>"),
    )
    .expect("write template");

    let config = AppConfig {
        index_path: index_path.to_string_lossy().into_owned(),
        static_dir: dir.path().to_string_lossy().into_owned(),
        training: crate::config_loader::TrainingConfig {
            seed: Some(42),
            ..Default::default()
        },
        ..Default::default()
    };

    let state = Arc::new(AppState::new(config, dataset));
    (build_router(state.clone()), state, dir)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

fn post_json(uri: &str, payload: &Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("POST")
        .header("Content-Type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request")
}

fn feedback_payload(preferred: f64, not_preferred: f64) -> Value {
    let features = |sentiment: f64| {
        json!({
            "sentiment": sentiment,
            "valence": 0.5,
            "arousal": 0.5,
            "dominance": 0.5,
            "tempo": 0.5,
        })
    };
    json!({
        "preferredText": features(preferred),
        "notPreferredText": features(not_preferred),
    })
}

#[tokio::test]
async fn test_route_returns_first_five_records() {
    let (app, _state, _dir) = test_app(Some(sample_records(7)));

    let response = app
        .oneshot(Request::builder().uri("/test").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let rows = body.as_array().expect("array");
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0]["text"], "Movie 0");
    assert_eq!(rows[4]["text"], "Movie 4");
}

#[tokio::test]
async fn index_embeds_the_dataset_json() {
    let (app, _state, _dir) = test_app(Some(sample_records(2)));

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("Movie 0"));
    assert!(html.contains("Movie 1"));
    assert!(!html.contains(DATASET_MARKER));
}

#[tokio::test]
async fn dataset_routes_report_missing_dataset() {
    let (app, _state, _dir) = test_app(None);

    for uri in ["/", "/test"] {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE, "{uri}");
    }
}

#[tokio::test]
async fn add_feedback_appends_exactly_two_examples_per_call() {
    let (app, state, _dir) = test_app(Some(sample_records(2)));

    let response = app
        .clone()
        .oneshot(post_json("/add-feedback", &feedback_payload(0.9, 0.1)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Feedback added successfully.");
    assert_eq!(state.feedback.read().unwrap().len(), 2);

    // a second distinct pair grows the store to four
    let response = app
        .oneshot(post_json("/add-feedback", &feedback_payload(0.8, 0.2)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(state.feedback.read().unwrap().len(), 4);
}

#[tokio::test]
async fn add_feedback_missing_field_is_rejected_without_mutation() {
    let (app, state, _dir) = test_app(Some(sample_records(2)));

    let payload = json!({
        "preferredText": {
            "sentiment": 0.9, "valence": 0.5, "arousal": 0.5,
            "dominance": 0.5, "tempo": 0.5,
        }
    });
    let response = app
        .oneshot(post_json("/add-feedback", &payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body.get("error").is_some());
    assert_eq!(state.feedback.read().unwrap().len(), 0);
}

#[tokio::test]
async fn train_without_feedback_is_rejected() {
    let (app, state, _dir) = test_app(Some(sample_records(2)));

    let response = app.oneshot(post_json("/train", &json!({}))).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(!state.model.read().unwrap().is_trained());
}

#[tokio::test]
async fn train_returns_one_snapshot_per_layer() {
    let (app, state, _dir) = test_app(Some(sample_records(2)));

    for (preferred, not_preferred) in [(0.9, 0.1), (0.8, 0.2)] {
        let response = app
            .clone()
            .oneshot(post_json(
                "/add-feedback",
                &feedback_payload(preferred, not_preferred),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
    assert_eq!(state.feedback.read().unwrap().len(), 4);

    let response = app.oneshot(post_json("/train", &json!({}))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let layers = body.as_array().expect("layer array");
    assert_eq!(layers.len(), 3);

    // input layer carries no parameters
    assert_eq!(layers[0]["layer"], 0);
    assert!(layers[0]["weights"].is_null());
    assert!(layers[0]["biases"].is_null());

    for (idx, layer) in layers.iter().enumerate().skip(1) {
        assert_eq!(layer["layer"], idx as u64);
        assert!(layer["weights"].is_array());
        assert!(layer["biases"].is_array());
    }

    assert!(state.model.read().unwrap().is_trained());
}

#[tokio::test]
async fn static_fallback_serves_files_and_404s_absent_ones() {
    let (app, _state, dir) = test_app(Some(sample_records(1)));
    std::fs::write(dir.path().join("style.css"), "body { margin: 0; }").unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/style.css")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/nothing-here.js")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn readiness_flips_after_training() {
    let (app, _state, _dir) = test_app(Some(sample_records(2)));

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/readyz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(body_json(response).await["ready"], false);

    let response = app
        .clone()
        .oneshot(post_json("/add-feedback", &feedback_payload(0.9, 0.1)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(post_json("/train", &json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/readyz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(body_json(response).await["ready"], true);
}

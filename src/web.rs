use std::sync::Arc;

use axum::{
    extract::State,
    response::{Html, Json},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::services::ServeDir;
use tracing::info;

use crate::api_errors::AppError;
use crate::app_state::AppState;
use crate::dataset::MovieRecord;
use crate::errors::{SafeReadLock, SafeWriteLock};
use crate::feedback::{FeatureVector, TrainingExample};
use crate::model::LayerSnapshot;

/// Placeholder in the HTML template that gets replaced with the dataset JSON.
pub const DATASET_MARKER: &str = "<!-- Backend will populate this JSON -->";

/// Rows returned by the `/test` debug route.
const PREVIEW_ROWS: usize = 5;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    pub preferred_text: Option<FeatureVector>,
    pub not_preferred_text: Option<FeatureVector>,
}

#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub message: String,
}

/// Build the full application router on shared state. Anything that no
/// route matches falls through to static files from the configured
/// directory.
pub fn build_router(state: Arc<AppState>) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route("/", get(serve_index))
        .route("/test", get(dataset_preview))
        .route("/add-feedback", post(add_feedback))
        .route("/train", post(train))
        // health endpoints
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .fallback_service(static_files)
        .with_state(state)
}

/// `GET /`: the HTML template with the dataset JSON substituted in.
/// The template is re-read from disk on every request.
#[axum::debug_handler]
async fn serve_index(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let records = state.dataset()?;
    let template = tokio::fs::read_to_string(&state.config.index_path)
        .await
        .map_err(|e| {
            AppError::internal(format!("cannot read {}: {e}", state.config.index_path))
        })?;

    let json = serde_json::to_string(records)
        .map_err(|e| AppError::internal(format!("dataset serialization failed: {e}")))?;

    Ok(Html(template.replace(DATASET_MARKER, &json)))
}

/// `GET /test`: the first few records, for inspection.
#[axum::debug_handler]
async fn dataset_preview(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<MovieRecord>>, AppError> {
    let records = state.dataset()?;
    Ok(Json(records.iter().take(PREVIEW_ROWS).cloned().collect()))
}

/// `POST /add-feedback`: record one preference choice as a labeled pair.
#[axum::debug_handler]
async fn add_feedback(
    State(state): State<Arc<AppState>>,
    Json(req): Json<FeedbackRequest>,
) -> Result<Json<FeedbackResponse>, AppError> {
    let (Some(preferred), Some(not_preferred)) = (req.preferred_text, req.not_preferred_text)
    else {
        return Err(AppError::bad_request(
            "Both preferredText and notPreferredText are required.",
        ));
    };

    let total = {
        let mut store = state.feedback.safe_write()?;
        store.push_pair(preferred, not_preferred);
        store.len()
    };
    info!(total, "feedback pair recorded");

    Ok(Json(FeedbackResponse {
        message: "Feedback added successfully.".to_string(),
    }))
}

/// `POST /train`: retrain over the whole accumulated feedback set and
/// return the per-layer weights. Training blocks the request until done.
#[axum::debug_handler]
async fn train(State(state): State<Arc<AppState>>) -> Result<Json<Vec<LayerSnapshot>>, AppError> {
    let examples: Vec<TrainingExample> = {
        let store = state.feedback.safe_read()?;
        if store.is_empty() {
            return Err(AppError::bad_request("No training data available."));
        }
        store.examples().to_vec()
    };

    let mut model = state.model.safe_write()?;
    let report = model.train(&examples, &state.config.training)?;
    info!(
        examples = examples.len(),
        iterations = report.iterations,
        error = report.error,
        "network trained"
    );

    Ok(Json(model.layers()))
}

async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

#[axum::debug_handler]
async fn readyz(State(state): State<Arc<AppState>>) -> Result<Json<serde_json::Value>, AppError> {
    let ready = state.has_dataset() && state.model.safe_read()?.is_trained();
    Ok(Json(serde_json::json!({ "ready": ready })))
}

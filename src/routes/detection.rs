use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::detection::DetectionConfigPatch;
use crate::response::{ok, AppError};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/config", get(get_config).put(update_config))
        .route("/stats", get(get_stats))
        .route("/reset", post(reset))
}

async fn get_config(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let config = state.detector().config().await;
    Ok(ok(config))
}

async fn update_config(
    State(state): State<AppState>,
    Json(patch): Json<DetectionConfigPatch>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let updated = state.detector().update_config(patch).await?;
    Ok(ok(updated))
}

async fn get_stats(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let stats = state.detector().stats().await;
    Ok(ok(stats))
}

async fn reset(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    state.detector().reset().await;
    Ok(ok(serde_json::json!({ "status": "reset" })))
}

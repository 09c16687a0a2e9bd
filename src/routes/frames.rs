use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;

use crate::detection::ear::{binocular_ear_from_mesh, MetricError};
use crate::detection::{FrameObservation, NormalizedPoint};
use crate::response::{ok, AppError};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(process_frame))
}

/// 单帧请求体：帧尺寸 + 客户端检测器输出的归一化关键点网格。
/// `landmarks` 为 null 表示本帧未检出人脸。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProcessFrameRequest {
    frame_width: f64,
    frame_height: f64,
    landmarks: Option<Vec<NormalizedPoint>>,
}

async fn process_frame(
    State(state): State<AppState>,
    Json(req): Json<ProcessFrameRequest>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    if !req.frame_width.is_finite()
        || !req.frame_height.is_finite()
        || req.frame_width <= 0.0
        || req.frame_height <= 0.0
    {
        return Err(AppError::bad_request(
            "INVALID_FRAME_SIZE",
            "frameWidth and frameHeight must be finite and > 0",
        ));
    }

    let observation = match req.landmarks.as_deref() {
        None => FrameObservation::NoFace,
        Some(mesh) => match binocular_ear_from_mesh(mesh, req.frame_width, req.frame_height) {
            Ok(ear) => FrameObservation::Ear(ear),
            // 关键点不足视同未检出人脸；退化几何计为指标错误帧
            Err(MetricError::InsufficientLandmarks { got, required }) => {
                tracing::debug!(got, required, "Landmark mesh too short for eye indices");
                FrameObservation::NoFace
            }
            Err(MetricError::Undefined) => FrameObservation::MetricFailed,
        },
    };

    let result = state.detector().tick(observation).await;
    Ok(ok(result))
}

//! 困倦检测核心模块
//!
//! ## 模块
//! - `geometry`: 像素坐标点与归一化关键点
//! - `ear`: EAR (Eye Aspect Ratio) 眼部纵横比计算
//! - `engine`: 帧级困倦检测状态机及其并发外壳
//! - `types`: 配置、帧观测与结果类型

pub mod ear;
pub mod engine;
pub mod geometry;
pub mod types;

pub use ear::{binocular_ear_from_mesh, binocular_ratio, EyeLandmarks, MetricError};
pub use engine::{DetectionEngine, DetectionState};
pub use geometry::{NormalizedPoint, Point2D};
pub use types::{
    DetectionConfig, DetectionConfigPatch, DetectionError, DetectionStats, FrameObservation,
    FrameResult, FrameStatus,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::DetectionEnvConfig;
use crate::constants::{DEFAULT_CONSECUTIVE_FRAMES, DEFAULT_EAR_THRESHOLD, DEFAULT_WINDOW_SIZE};

#[derive(Debug, Error)]
pub enum DetectionError {
    #[error("config out of range: {0}")]
    ConfigOutOfRange(String),
}

/// 检测参数，运行期可整体热更新
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionConfig {
    /// EAR 阈值，低于该值的帧计为闭眼帧
    pub ear_threshold: f64,
    /// 连续闭眼帧数达到该值后触发告警
    pub consecutive_frames: u32,
    /// 平滑窗口参数。当前算法未消费该字段，仅存储并对外返回，
    /// 为后续引入滑动窗口平滑预留。
    pub window_size: u32,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            ear_threshold: DEFAULT_EAR_THRESHOLD,
            consecutive_frames: DEFAULT_CONSECUTIVE_FRAMES,
            window_size: DEFAULT_WINDOW_SIZE,
        }
    }
}

impl DetectionConfig {
    pub fn from_env(env: &DetectionEnvConfig) -> Self {
        Self {
            ear_threshold: env.ear_threshold,
            consecutive_frames: env.consecutive_frames,
            window_size: env.window_size,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.ear_threshold.is_finite() || self.ear_threshold <= 0.0 {
            return Err("earThreshold must be finite and > 0".to_string());
        }
        if self.consecutive_frames == 0 {
            return Err("consecutiveFrames must be >= 1".to_string());
        }
        if self.window_size == 0 {
            return Err("windowSize must be >= 1".to_string());
        }
        Ok(())
    }

    /// 应用部分更新后的候选配置，未提供的字段保持不变
    pub fn patched(&self, patch: &DetectionConfigPatch) -> Self {
        Self {
            ear_threshold: patch.ear_threshold.unwrap_or(self.ear_threshold),
            consecutive_frames: patch.consecutive_frames.unwrap_or(self.consecutive_frames),
            window_size: patch.window_size.unwrap_or(self.window_size),
        }
    }
}

/// 配置部分更新请求体
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionConfigPatch {
    pub ear_threshold: Option<f64>,
    pub consecutive_frames: Option<u32>,
    pub window_size: Option<u32>,
}

/// 单帧输入：有效指标，或两种"本帧无指标"信号
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameObservation {
    /// 本帧的双眼 EAR
    Ear(f64),
    /// 上游未检测到可用人脸
    NoFace,
    /// 指标计算失败（退化几何等）
    MetricFailed,
}

/// 帧分类结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FrameStatus {
    Awake,
    Drowsy,
    NoFace,
    MetricError,
}

/// 一次 tick 的完整输出
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameResult {
    pub status: FrameStatus,
    /// 本帧 EAR 原始值；无指标帧为 None
    pub ear: Option<f64>,
    /// 仅在 AWAKE→DROWSY 跳变的那一帧为 true
    pub alert_triggered: bool,
    pub closed_frames: u32,
    pub frame_count: u64,
    pub drowsy_frames: u64,
}

/// 累计统计快照
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionStats {
    pub frames_processed: u64,
    pub drowsy_frames: u64,
    /// 困倦帧占比（百分数，保留两位小数）
    pub drowsy_percentage: f64,
    pub last_alert_at: Option<DateTime<Utc>>,
}

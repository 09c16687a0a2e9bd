//! 帧级困倦检测状态机
//!
//! `DetectionState::advance` 是纯转移函数，每帧推进一次；
//! `DetectionEngine` 在其外提供加锁的并发外壳，保证 tick、配置更新、
//! 重置与统计读取各自作为串行化的原子单元执行。
//! 闭眼帧计数对顺序敏感，乱序投递不在支持范围内。

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};

use crate::detection::types::{
    DetectionConfig, DetectionConfigPatch, DetectionError, DetectionStats, FrameObservation,
    FrameResult, FrameStatus,
};

/// 跨帧存续的检测状态
#[derive(Debug, Clone, Default)]
pub struct DetectionState {
    /// 当前连续低于阈值的帧数
    pub closed_frames: u32,
    /// 告警锁存：确认持续闭眼后置位，睁眼帧清零
    pub alert_latched: bool,
    /// 已处理帧总数（含无指标帧）
    pub frame_count: u64,
    /// 计入告警确认的帧总数
    pub drowsy_frames: u64,
    /// 最近一次 AWAKE→DROWSY 跳变时刻
    pub last_alert_at: Option<DateTime<Utc>>,
}

impl DetectionState {
    /// 按一帧观测推进状态并给出分类
    ///
    /// 无指标帧（NO_FACE / METRIC_ERROR）只累计 frame_count，
    /// 不触碰 closed_frames 与锁存——短暂跟踪丢失不中断闭眼计数。
    pub fn advance(
        &mut self,
        config: &DetectionConfig,
        observation: FrameObservation,
    ) -> FrameResult {
        self.frame_count += 1;

        let ear = match observation {
            FrameObservation::Ear(value) => value,
            FrameObservation::NoFace => return self.unreadable(FrameStatus::NoFace),
            FrameObservation::MetricFailed => return self.unreadable(FrameStatus::MetricError),
        };

        let mut alert_triggered = false;
        if ear < config.ear_threshold {
            self.closed_frames += 1;

            if self.closed_frames >= config.consecutive_frames {
                self.drowsy_frames += 1;

                if !self.alert_latched {
                    self.alert_latched = true;
                    self.last_alert_at = Some(Utc::now());
                    alert_triggered = true;
                }
            }
        } else {
            self.closed_frames = 0;
            self.alert_latched = false;
        }

        let status = if self.alert_latched {
            FrameStatus::Drowsy
        } else {
            FrameStatus::Awake
        };

        FrameResult {
            status,
            ear: Some(ear),
            alert_triggered,
            closed_frames: self.closed_frames,
            frame_count: self.frame_count,
            drowsy_frames: self.drowsy_frames,
        }
    }

    fn unreadable(&self, status: FrameStatus) -> FrameResult {
        FrameResult {
            status,
            ear: None,
            alert_triggered: false,
            closed_frames: self.closed_frames,
            frame_count: self.frame_count,
            drowsy_frames: self.drowsy_frames,
        }
    }

    fn stats(&self) -> DetectionStats {
        let percentage =
            (self.drowsy_frames as f64 / self.frame_count.max(1) as f64) * 100.0;
        DetectionStats {
            frames_processed: self.frame_count,
            drowsy_frames: self.drowsy_frames,
            drowsy_percentage: (percentage * 100.0).round() / 100.0,
            last_alert_at: self.last_alert_at,
        }
    }
}

/// 检测引擎：状态机 + 并发外壳
///
/// 由 AppState 持有并注入各路由，不使用全局单例，
/// 测试中可并存多个互不干扰的引擎实例。
pub struct DetectionEngine {
    config: RwLock<DetectionConfig>,
    state: Mutex<DetectionState>,
}

impl DetectionEngine {
    pub fn new(config: DetectionConfig) -> Self {
        Self {
            config: RwLock::new(config),
            state: Mutex::new(DetectionState::default()),
        }
    }

    /// 处理一帧。状态锁覆盖整个读-改-写过程
    pub async fn tick(&self, observation: FrameObservation) -> FrameResult {
        let mut state = self.state.lock().await;
        let config = self.config.read().await;
        let result = state.advance(&config, observation);

        if result.alert_triggered {
            tracing::warn!(
                closed_frames = result.closed_frames,
                frame_count = result.frame_count,
                "Drowsiness alert triggered"
            );
        }

        result
    }

    /// 部分更新配置：先对补丁后的候选整体校验，校验失败不落盘。
    /// 自下一帧起生效。
    pub async fn update_config(
        &self,
        patch: DetectionConfigPatch,
    ) -> Result<DetectionConfig, DetectionError> {
        let mut config = self.config.write().await;
        let candidate = config.patched(&patch);
        candidate
            .validate()
            .map_err(DetectionError::ConfigOutOfRange)?;
        *config = candidate.clone();
        tracing::info!(
            ear_threshold = candidate.ear_threshold,
            consecutive_frames = candidate.consecutive_frames,
            window_size = candidate.window_size,
            "Detection config updated"
        );
        Ok(candidate)
    }

    pub async fn config(&self) -> DetectionConfig {
        self.config.read().await.clone()
    }

    pub async fn stats(&self) -> DetectionStats {
        self.state.lock().await.stats()
    }

    /// 清零全部状态计数，配置保持不变
    pub async fn reset(&self) {
        let mut state = self.state.lock().await;
        *state = DetectionState::default();
        tracing::info!("Detection state reset");
    }
}

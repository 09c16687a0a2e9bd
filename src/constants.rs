/// 默认 EAR 阈值，低于该值的帧视为闭眼
pub const DEFAULT_EAR_THRESHOLD: f64 = 0.25;

/// 默认触发告警所需的连续闭眼帧数
pub const DEFAULT_CONSECUTIVE_FRAMES: u32 = 20;

/// 默认平滑窗口大小（预留参数，见 DetectionConfig::window_size）
pub const DEFAULT_WINDOW_SIZE: u32 = 10;

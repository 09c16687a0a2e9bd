use std::sync::Arc;

use axum::Router;
use tokio::sync::broadcast;

use drowsy_backend::config::{Config, DetectionEnvConfig};
use drowsy_backend::detection::{DetectionConfig, DetectionEngine};
use drowsy_backend::routes::build_router;
use drowsy_backend::state::AppState;

pub struct TestApp {
    pub app: Router,
    pub state: AppState,
}

// 直接构造 Config，避免使用 set_var 造成多线程测试环境变量竞态
fn test_config(detection: &DetectionConfig) -> Config {
    Config {
        host: std::net::IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
        port: 8000,
        log_level: "info".to_string(),
        enable_file_logs: false,
        log_dir: "./logs".to_string(),
        cors_origin: "*".to_string(),
        detection: DetectionEnvConfig {
            ear_threshold: detection.ear_threshold,
            consecutive_frames: detection.consecutive_frames,
            window_size: detection.window_size,
        },
    }
}

pub fn spawn_with_detection(detection: DetectionConfig) -> TestApp {
    let config = test_config(&detection);
    let detector = Arc::new(DetectionEngine::new(detection));
    let (shutdown_tx, _) = broadcast::channel::<()>(8);

    let state = AppState::new(detector, &config, shutdown_tx);
    let app = build_router(state.clone());

    TestApp { app, state }
}

pub fn spawn_test_app() -> TestApp {
    spawn_with_detection(DetectionConfig::default())
}

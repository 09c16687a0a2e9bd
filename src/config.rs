use std::env;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;

use crate::constants::{DEFAULT_CONSECUTIVE_FRAMES, DEFAULT_EAR_THRESHOLD, DEFAULT_WINDOW_SIZE};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
    pub enable_file_logs: bool,
    pub log_dir: String,
    pub cors_origin: String,
    pub detection: DetectionEnvConfig,
}

/// 检测引擎的启动参数，运行期可通过配置接口覆盖
#[derive(Debug, Clone)]
pub struct DetectionEnvConfig {
    pub ear_threshold: f64,
    pub consecutive_frames: u32,
    pub window_size: u32,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: env_or_parse("HOST", IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))),
            port: env_or_parse("PORT", 8000_u16),
            log_level: env_or("RUST_LOG", "info"),
            enable_file_logs: env_or_bool("ENABLE_FILE_LOGS", false),
            log_dir: env_or("LOG_DIR", "./logs"),
            cors_origin: env_or("CORS_ORIGIN", "*"),
            detection: DetectionEnvConfig {
                ear_threshold: env_or_parse("EAR_THRESHOLD", DEFAULT_EAR_THRESHOLD),
                consecutive_frames: env_or_parse("CONSECUTIVE_FRAMES", DEFAULT_CONSECUTIVE_FRAMES),
                window_size: env_or_parse("WINDOW_SIZE", DEFAULT_WINDOW_SIZE),
            },
        }
    }
}

pub fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

pub fn env_or_parse<T>(key: &str, default: T) -> T
where
    T: FromStr + Copy,
{
    match env::var(key) {
        Ok(raw) => match raw.parse::<T>() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!(
                    key,
                    value = %raw,
                    "Failed to parse env var, using default"
                );
                default
            }
        },
        Err(_) => default,
    }
}

pub fn env_or_bool(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Mutex, OnceLock};

    use super::*;

    fn env_lock() -> &'static Mutex<()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
    }

    fn managed_keys() -> &'static [&'static str] {
        &[
            "HOST",
            "PORT",
            "RUST_LOG",
            "CORS_ORIGIN",
            "EAR_THRESHOLD",
            "CONSECUTIVE_FRAMES",
            "WINDOW_SIZE",
        ]
    }

    fn clear_keys(keys: &[&str]) {
        for key in keys {
            env::remove_var(key);
        }
    }

    #[test]
    fn loads_defaults_when_missing() {
        let _guard = env_lock().lock().expect("env lock");
        clear_keys(managed_keys());

        let cfg = Config::from_env();
        assert_eq!(cfg.port, 8000);
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.cors_origin, "*");
        assert_eq!(cfg.detection.ear_threshold, 0.25);
        assert_eq!(cfg.detection.consecutive_frames, 20);
        assert_eq!(cfg.detection.window_size, 10);
    }

    #[test]
    fn parses_numeric_values() {
        let _guard = env_lock().lock().expect("env lock");
        clear_keys(managed_keys());

        env::set_var("PORT", "9000");
        env::set_var("EAR_THRESHOLD", "0.21");
        env::set_var("CONSECUTIVE_FRAMES", "12");

        let cfg = Config::from_env();
        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.detection.ear_threshold, 0.21);
        assert_eq!(cfg.detection.consecutive_frames, 12);
    }

    #[test]
    fn invalid_values_fall_back() {
        let _guard = env_lock().lock().expect("env lock");
        clear_keys(managed_keys());

        env::set_var("PORT", "bad");
        env::set_var("EAR_THRESHOLD", "not-a-number");
        env::set_var("WINDOW_SIZE", "-3");

        let cfg = Config::from_env();
        assert_eq!(cfg.port, 8000);
        assert_eq!(cfg.detection.ear_threshold, 0.25);
        assert_eq!(cfg.detection.window_size, 10);
    }
}

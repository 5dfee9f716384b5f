use std::env;
use std::path::PathBuf;

use crate::constants::DEFAULT_TASK_FILE;
use crate::logging::LogConfig;

#[derive(Debug, Clone)]
pub struct Config {
    pub task_file: PathBuf,
    pub log_level: String,
    pub enable_file_logs: bool,
    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            task_file: PathBuf::from(env_or("TASK_FILE", DEFAULT_TASK_FILE)),
            log_level: env_or("RUST_LOG", "info"),
            enable_file_logs: env_or_bool("ENABLE_FILE_LOGS", false),
            log_dir: env_or("LOG_DIR", "./logs"),
        }
    }

    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            log_level: self.log_level.clone(),
            enable_file_logs: self.enable_file_logs,
            log_dir: self.log_dir.clone(),
        }
    }
}

pub fn env_or(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw,
        _ => default.to_string(),
    }
}

pub fn env_or_bool(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => {
                tracing::warn!(key, value = %raw, "Failed to parse env flag, using default");
                default
            }
        },
        Err(_) => default,
    }
}

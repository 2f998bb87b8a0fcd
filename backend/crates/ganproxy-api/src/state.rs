//! Process-level information shared with handlers

use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct ServerInfo {
    pub version: String,
    pub started_at: Instant,
    /// Session log file, when file logging is enabled
    pub log_file: Option<PathBuf>,
}

impl ServerInfo {
    pub fn new(log_file: Option<PathBuf>) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            started_at: Instant::now(),
            log_file,
        }
    }

    pub fn uptime_seconds(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }
}

//! Health check response model

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "OK" while the process serves requests
    pub status: String,
    pub message: String,
    pub timestamp: String,
    pub server_info: HealthServerInfo,
    pub endpoints: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthServerInfo {
    pub version: String,
    pub uptime_seconds: f64,
    pub log_file: String,
}

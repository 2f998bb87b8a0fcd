use super::defaults::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Main proxy configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub oracle: OracleSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    pub cors: CorsSettings,
    #[serde(default)]
    pub limits: LimitsSettings,
}

/// Listening socket settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_workers")]
    pub workers: usize,
}

/// Downstream Oracle execution API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleSettings {
    #[serde(default = "default_oracle_host")]
    pub host: String,
    #[serde(default = "default_oracle_port")]
    pub port: u16,
    /// Path receiving `{"query": "<sql>"}` bodies
    #[serde(default = "default_insert_endpoint")]
    pub insert_endpoint: String,
    /// Path receiving procedure payloads verbatim
    #[serde(default = "default_procedure_endpoint")]
    pub procedure_endpoint: String,
    /// Bearer token sent on every downstream call
    #[serde(default = "default_oracle_token")]
    pub token: String,
    /// Schema prefix for generated INSERT statements
    #[serde(default = "default_schema")]
    pub schema: String,
    /// Upper bound for each downstream call; an expired item is recorded as failed
    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Write a per-session log file under `directory`
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_log_directory")]
    pub directory: String,
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_true")]
    pub log_to_console: bool,
    /// "compact" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
    /// Per-target level overrides, e.g. `ganproxy_core = "debug"`
    #[serde(default)]
    pub targets: HashMap<String, String>,
}

/// CORS configuration that maps directly to actix-cors options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Use ["*"] (or leave empty) for any origin
    #[serde(default = "default_cors_origins")]
    pub allowed_origins: Vec<String>,
    #[serde(default = "default_cors_methods")]
    pub allowed_methods: Vec<String>,
    #[serde(default = "default_cors_headers")]
    pub allowed_headers: Vec<String>,
    /// Preflight cache duration in seconds
    #[serde(default = "default_cors_max_age")]
    pub max_age: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsSettings {
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: default_workers(),
        }
    }
}

impl Default for OracleSettings {
    fn default() -> Self {
        Self {
            host: default_oracle_host(),
            port: default_oracle_port(),
            insert_endpoint: default_insert_endpoint(),
            procedure_endpoint: default_procedure_endpoint(),
            token: default_oracle_token(),
            schema: default_schema(),
            request_timeout_seconds: default_request_timeout_seconds(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            directory: default_log_directory(),
            level: default_log_level(),
            log_to_console: default_true(),
            format: default_log_format(),
            targets: HashMap::new(),
        }
    }
}

impl Default for CorsSettings {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            allowed_origins: default_cors_origins(),
            allowed_methods: default_cors_methods(),
            allowed_headers: default_cors_headers(),
            max_age: default_cors_max_age(),
        }
    }
}

impl Default for LimitsSettings {
    fn default() -> Self {
        Self {
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl OracleSettings {
    /// `http://<host>:<port>`
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    pub fn insert_url(&self) -> String {
        format!("{}{}", self.base_url(), self.insert_endpoint)
    }

    pub fn procedure_url(&self) -> String {
        format!("{}{}", self.base_url(), self.procedure_endpoint)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Token safe to print: first two characters followed by `***`
    pub fn masked_token(&self) -> String {
        let visible: String = self.token.chars().take(2).collect();
        format!("{}***", visible)
    }
}

impl ServerConfig {
    /// `host:port` the HTTP server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

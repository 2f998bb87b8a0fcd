use super::types::ServerConfig;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable holding a complete TOML configuration
pub const ENV_EMBEDDED_CONFIG: &str = "GANPROXY_EMBEDDED_CONFIG";
/// Environment variable pointing at a configuration file (last lookup candidate)
pub const ENV_CONFIG_FILE: &str = "GANPROXY_CONFIG_FILE";

const SEARCH_PATHS: [&str; 3] = ["./config.toml", "../config.toml", "./config/config.toml"];

static RE_SCHEMA: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_$#]*$").unwrap());

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Embedded,
    Defaults,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::Embedded => write!(f, "embedded config ({})", ENV_EMBEDDED_CONFIG),
            ConfigSource::Defaults => write!(f, "built-in defaults"),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file
    ///
    /// Note: Environment overrides are applied separately via `apply_env_overrides()`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse config file: {}", e))
    }

    /// Resolve the configuration source.
    ///
    /// An explicit path must load; otherwise the embedded config, the search
    /// paths and `GANPROXY_CONFIG_FILE` are tried in order, skipping candidates
    /// that fail to load, and built-in defaults are used when none works.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<(Self, ConfigSource)> {
        if let Some(path) = explicit {
            let config = Self::from_file(path)
                .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))?;
            return Ok((config, ConfigSource::File(path.to_path_buf())));
        }

        let embedded = std::env::var(ENV_EMBEDDED_CONFIG).ok();
        let mut candidates: Vec<PathBuf> = SEARCH_PATHS.iter().map(PathBuf::from).collect();
        if let Ok(path) = std::env::var(ENV_CONFIG_FILE) {
            if !path.trim().is_empty() {
                candidates.push(PathBuf::from(path));
            }
        }

        Ok(Self::discover(embedded.as_deref(), &candidates))
    }

    /// First loadable source among `embedded` and `candidates`, else defaults.
    pub fn discover(embedded: Option<&str>, candidates: &[PathBuf]) -> (Self, ConfigSource) {
        if let Some(content) = embedded {
            match Self::from_toml_str(content) {
                Ok(config) => return (config, ConfigSource::Embedded),
                Err(e) => log::warn!("Ignoring embedded configuration: {}", e),
            }
        }

        for path in candidates {
            if !path.exists() {
                continue;
            }
            match Self::from_file(path) {
                Ok(config) => return (config, ConfigSource::File(path.clone())),
                Err(e) => log::warn!("Ignoring {}: {}", path.display(), e),
            }
        }

        (Self::default(), ConfigSource::Defaults)
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - GANPROXY_HOST / GANPROXY_PORT: listening socket
    /// - GANPROXY_ORACLE_HOST / GANPROXY_ORACLE_PORT: downstream API
    /// - GANPROXY_ORACLE_TOKEN: downstream bearer token
    /// - GANPROXY_LOG_DIR: session log directory
    pub fn apply_env_overrides(&mut self) -> anyhow::Result<()> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    pub(crate) fn apply_overrides_from<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("GANPROXY_HOST") {
            self.server.host = host;
        }

        if let Some(port) = lookup("GANPROXY_PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid GANPROXY_PORT value: {}", port))?;
        }

        if let Some(host) = lookup("GANPROXY_ORACLE_HOST") {
            self.oracle.host = host;
        }

        if let Some(port) = lookup("GANPROXY_ORACLE_PORT") {
            self.oracle.port = port
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid GANPROXY_ORACLE_PORT value: {}", port))?;
        }

        if let Some(token) = lookup("GANPROXY_ORACLE_TOKEN") {
            self.oracle.token = token;
        }

        if let Some(dir) = lookup("GANPROXY_LOG_DIR") {
            self.logging.directory = dir;
        }

        Ok(())
    }

    /// Validate configuration settings
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.port == 0 {
            return Err(anyhow::anyhow!("Server port cannot be 0"));
        }

        if self.oracle.port == 0 {
            return Err(anyhow::anyhow!("Oracle port cannot be 0"));
        }

        if self.oracle.host.trim().is_empty() {
            return Err(anyhow::anyhow!("Oracle host cannot be empty"));
        }

        if !RE_SCHEMA.is_match(&self.oracle.schema) {
            return Err(anyhow::anyhow!(
                "Invalid schema '{}'. Must be a plain SQL identifier",
                self.oracle.schema
            ));
        }

        for (name, endpoint) in [
            ("insert_endpoint", &self.oracle.insert_endpoint),
            ("procedure_endpoint", &self.oracle.procedure_endpoint),
        ] {
            if !endpoint.starts_with('/') {
                return Err(anyhow::anyhow!("{} must start with '/': {}", name, endpoint));
            }
        }

        if self.oracle.request_timeout_seconds == 0 {
            return Err(anyhow::anyhow!("request_timeout_seconds cannot be 0"));
        }

        if self.limits.max_body_bytes == 0 {
            return Err(anyhow::anyhow!("max_body_bytes cannot be 0"));
        }

        // Validate log level
        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_levels.join(", ")
            ));
        }

        for (target, level) in &self.logging.targets {
            if !valid_levels.contains(&level.as_str()) {
                return Err(anyhow::anyhow!(
                    "Invalid log level '{}' for target '{}'. Must be one of: {}",
                    level,
                    target,
                    valid_levels.join(", ")
                ));
            }
        }

        // Validate log format
        let valid_formats = ["compact", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_formats.join(", ")
            ));
        }

        Ok(())
    }
}

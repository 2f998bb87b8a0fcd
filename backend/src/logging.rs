// Logging module, powered by tracing-subscriber
//
// `tracing_log::LogTracer` routes every `log::*` call from the proxy crates
// through the subscriber. Each process run writes its own session file.

use std::collections::HashMap;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use ganproxy_configs::LoggingSettings;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Log format type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Compact text format: timestamp LEVEL target - message
    Compact,
    /// JSON Lines format for structured logging
    Json,
}

impl LogFormat {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" | "jsonl" => LogFormat::Json,
            _ => LogFormat::Compact,
        }
    }
}

/// Session file name for a server started at `started`
pub fn session_file_name(started: DateTime<Utc>) -> String {
    started.format("server-%Y-%m-%d_%H-%M-%S.log").to_string()
}

/// Build the `EnvFilter` from the base level, hardcoded noisy-crate
/// overrides, and optional per-target overrides from config.
fn build_env_filter(
    level: &str,
    target_levels: Option<&HashMap<String, String>>,
) -> anyhow::Result<EnvFilter> {
    let mut directives = vec![level.to_string()];

    let noisy: &[(&str, &str)] = &[
        ("actix_server", "warn"),
        ("actix_web", "info"),
        ("h2", "warn"),
        ("hyper", "warn"),
        ("hyper_util", "warn"),
        ("reqwest", "warn"),
        ("rustls", "warn"),
    ];
    for (target, lvl) in noisy {
        directives.push(format!("{}={}", target, lvl));
    }

    if let Some(map) = target_levels {
        for (target, lvl) in map.iter() {
            directives.push(format!("{}={}", target, lvl));
        }
    }

    let filter_str = directives.join(",");
    EnvFilter::try_new(&filter_str)
        .map_err(|e| anyhow::anyhow!("Invalid tracing filter '{}': {}", filter_str, e))
}

fn create_session_file(directory: &Path) -> anyhow::Result<(File, PathBuf)> {
    fs::create_dir_all(directory)?;
    let path = directory.join(session_file_name(Utc::now()));
    let file = File::create(&path)
        .map_err(|e| anyhow::anyhow!("Cannot create log file {}: {}", path.display(), e))?;
    Ok((file, path))
}

/// Initialize logging based on configuration.
///
/// Sets up `tracing-subscriber` with:
///  - Colored console layer (when `log_to_console` is true)
///  - Session file layer (compact text or JSON lines) when logging is enabled
///  - `tracing_log::LogTracer` bridge so that all `log::*` calls are captured
///
/// Returns the session file path, if one was created.
pub fn init_logging(settings: &LoggingSettings) -> anyhow::Result<Option<PathBuf>> {
    let log_format = LogFormat::parse(&settings.format);
    let targets = Some(&settings.targets);

    let session = if settings.enabled {
        Some(create_session_file(Path::new(&settings.directory))?)
    } else {
        None
    };

    tracing_log::LogTracer::init().ok(); // ok() in case already initialized

    let console_layer = if settings.log_to_console {
        Some(
            tracing_subscriber::fmt::layer()
                .with_ansi(true)
                .with_target(true)
                .with_filter(build_env_filter(&settings.level, targets)?),
        )
    } else {
        None
    };

    let (file_layer, file_path) = match session {
        Some((file, path)) => {
            let layer = if log_format == LogFormat::Json {
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(file)
                    .with_target(true)
                    .with_filter(build_env_filter(&settings.level, targets)?)
                    .boxed()
            } else {
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(file)
                    .with_target(true)
                    .with_filter(build_env_filter(&settings.level, targets)?)
                    .boxed()
            };
            (Some(layer), Some(path))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))?;

    tracing::trace!(
        "Logging initialized: level={}, console={}, file={:?}",
        settings.level,
        settings.log_to_console,
        file_path
    );

    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_session_file_name_format() {
        let started = Utc.with_ymd_and_hms(2025, 3, 7, 9, 5, 1).unwrap();
        assert_eq!(session_file_name(started), "server-2025-03-07_09-05-01.log");
    }

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("JSON"), LogFormat::Json);
        assert_eq!(LogFormat::parse("jsonl"), LogFormat::Json);
        assert_eq!(LogFormat::parse("compact"), LogFormat::Compact);
        assert_eq!(LogFormat::parse("anything"), LogFormat::Compact);
    }

    #[test]
    fn test_env_filter_accepts_target_overrides() {
        let mut targets = HashMap::new();
        targets.insert("ganproxy_core".to_string(), "debug".to_string());
        assert!(build_env_filter("info", Some(&targets)).is_ok());
        assert!(build_env_filter("warn", None).is_ok());
    }

    #[test]
    fn test_env_filter_rejects_garbage() {
        let mut targets = HashMap::new();
        targets.insert("ganproxy_core".to_string(), "[[[".to_string());
        assert!(build_env_filter("info", Some(&targets)).is_err());
    }

    #[test]
    fn test_session_file_is_created_in_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("logs");
        let (_file, path) = create_session_file(&nested).unwrap();
        assert!(path.exists());
        assert!(path.starts_with(&nested));
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("server-") && name.ends_with(".log"));
    }
}

//! Logging collaborator for the request pipeline
//!
//! The validator and executor report what they do as [`ProxyEvent`]s to an
//! injected [`EventSink`]. The server wires in [`TracingEventSink`]; tests use
//! [`MemoryEventSink`] and inspect the captured events.

use parking_lot::Mutex;

/// Max characters of a statement shown in response log lines
pub const QUERY_PREVIEW_CHARS: usize = 100;
/// Max characters of a downstream body shown in response log lines
pub const RESULT_PREVIEW_CHARS: usize = 200;

/// Which validation mode rejected a payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    Insert,
    Procedure,
}

impl ValidationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationMode::Insert => "insert",
            ValidationMode::Procedure => "procedure",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxyEvent {
    BatchStarted {
        total: usize,
    },
    /// A statement is about to be sent; `index` is 0-based
    Statement {
        index: usize,
        total: usize,
        sql: String,
    },
    DownstreamCall {
        method: &'static str,
        url: String,
        body: String,
    },
    DownstreamResponse {
        index: Option<usize>,
        status: u16,
        query_preview: String,
        result_preview: String,
    },
    DownstreamFailure {
        index: Option<usize>,
        message: String,
    },
    BatchCompleted {
        successful: usize,
        failed: usize,
    },
    ValidationRejected {
        mode: ValidationMode,
        reason: String,
    },
    ValidationPassed {
        mode: ValidationMode,
        count: usize,
    },
}

pub trait EventSink: Send + Sync {
    fn record(&self, event: ProxyEvent);
}

/// Writes events through the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn record(&self, event: ProxyEvent) {
        match event {
            ProxyEvent::BatchStarted { total } => {
                log::info!("Processing {} inserts", total);
            }
            ProxyEvent::Statement { index, total, sql } => {
                log::info!("SQL {}/{}: {}", index + 1, total, sql);
            }
            ProxyEvent::DownstreamCall { method, url, body } => {
                log::debug!("API call: {} {} body={}", method, url, body);
            }
            ProxyEvent::DownstreamResponse {
                index,
                status,
                query_preview,
                result_preview,
            } => match index {
                Some(idx) => log::info!(
                    "Response {}: insert {} completed | query={} result={}",
                    status,
                    idx + 1,
                    query_preview,
                    result_preview
                ),
                None => log::info!("Response {}: {}", status, result_preview),
            },
            ProxyEvent::DownstreamFailure { index, message } => match index {
                Some(idx) => log::error!("Insert {} failed: {}", idx + 1, message),
                None => log::error!("Downstream call failed: {}", message),
            },
            ProxyEvent::BatchCompleted { successful, failed } => {
                log::info!(
                    "Processing completed: {} successful, {} failed",
                    successful,
                    failed
                );
            }
            ProxyEvent::ValidationRejected { mode, reason } => {
                log::warn!("{} validation failed: {}", mode.as_str(), reason);
            }
            ProxyEvent::ValidationPassed { mode, count } => {
                log::debug!("{} validation passed for {} element(s)", mode.as_str(), count);
            }
        }
    }
}

/// Captures events in memory
#[derive(Debug, Default)]
pub struct MemoryEventSink {
    events: Mutex<Vec<ProxyEvent>>,
}

impl MemoryEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ProxyEvent> {
        self.events.lock().clone()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl EventSink for MemoryEventSink {
    fn record(&self, event: ProxyEvent) {
        self.events.lock().push(event);
    }
}

/// First `max_chars` characters of `text`, with `...` appended when cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_short_text_untouched() {
        assert_eq!(preview("abc", 5), "abc");
        assert_eq!(preview("abcde", 5), "abcde");
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        assert_eq!(preview("abcdef", 3), "abc...");
        assert_eq!(preview("ñandú", 2), "ña...");
    }

    #[test]
    fn test_memory_sink_keeps_order() {
        let sink = MemoryEventSink::new();
        sink.record(ProxyEvent::BatchStarted { total: 2 });
        sink.record(ProxyEvent::BatchCompleted {
            successful: 1,
            failed: 1,
        });
        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], ProxyEvent::BatchStarted { total: 2 });

        sink.clear();
        assert!(sink.events().is_empty());
    }
}

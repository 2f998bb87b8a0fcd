//! Result models returned by the batch executor

use serde::{Deserialize, Serialize};

/// Status recorded for an item whose downstream call never produced a response
pub const TRANSPORT_FAILURE_STATUS: u16 = 500;

/// Raw downstream HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownstreamResponse {
    pub status: u16,
    pub body: String,
    /// `Content-Type` sent by the downstream service, if any
    pub content_type: Option<String>,
}

impl DownstreamResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Outcome of one statement sent downstream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResult {
    /// The SQL text that was sent
    pub insert: String,
    /// Downstream HTTP status, or 500 when the call failed at transport level
    pub status: u16,
    /// Downstream body text, or the transport error message
    pub result: String,
}

impl QueryResult {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Aggregate of a whole batch.
///
/// `total == successful + failed == details.len()`, details in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub details: Vec<QueryResult>,
}

impl ProcessingSummary {
    pub fn from_details(details: Vec<QueryResult>) -> Self {
        let successful = details.iter().filter(|r| r.is_success()).count();
        Self {
            total: details.len(),
            successful,
            failed: details.len() - successful,
            details,
        }
    }
}

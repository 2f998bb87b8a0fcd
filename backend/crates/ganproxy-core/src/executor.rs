//! Sequential batch execution against the downstream API
//!
//! Statements are sent strictly one after another: item `i + 1` is dispatched
//! only once item `i` has produced a response or failed. Per-item failures
//! become data in the summary and never abort the rest of the batch.

use crate::error::TransportError;
use crate::events::{
    preview, EventSink, ProxyEvent, QUERY_PREVIEW_CHARS, RESULT_PREVIEW_CHARS,
};
use crate::models::{DownstreamResponse, ProcessingSummary, QueryResult, TRANSPORT_FAILURE_STATUS};
use crate::transport::OracleTransport;
use bytes::Bytes;
use serde::Serialize;
use std::sync::Arc;

/// Fully qualified downstream URLs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownstreamEndpoints {
    pub insert_url: String,
    pub procedure_url: String,
}

/// Body shape expected by the downstream insert endpoint
#[derive(Serialize)]
struct QueryPayload<'a> {
    query: &'a str,
}

pub struct BatchExecutor {
    transport: Arc<dyn OracleTransport>,
    endpoints: DownstreamEndpoints,
    events: Arc<dyn EventSink>,
}

impl BatchExecutor {
    pub fn new(
        transport: Arc<dyn OracleTransport>,
        endpoints: DownstreamEndpoints,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            transport,
            endpoints,
            events,
        }
    }

    pub fn endpoints(&self) -> &DownstreamEndpoints {
        &self.endpoints
    }

    /// Send every statement in order and aggregate the outcomes.
    pub async fn execute(&self, statements: &[String]) -> ProcessingSummary {
        let total = statements.len();
        self.events.record(ProxyEvent::BatchStarted { total });

        let mut details = Vec::with_capacity(total);
        for (index, statement) in statements.iter().enumerate() {
            details.push(self.execute_statement(statement, index, total).await);
        }

        let summary = ProcessingSummary::from_details(details);
        self.events.record(ProxyEvent::BatchCompleted {
            successful: summary.successful,
            failed: summary.failed,
        });
        summary
    }

    async fn execute_statement(&self, statement: &str, index: usize, total: usize) -> QueryResult {
        self.events.record(ProxyEvent::Statement {
            index,
            total,
            sql: statement.to_string(),
        });

        let payload = match serde_json::to_vec(&QueryPayload { query: statement }) {
            Ok(payload) => payload,
            Err(e) => return self.failed(statement, index, e.to_string()),
        };

        self.events.record(ProxyEvent::DownstreamCall {
            method: "POST",
            url: self.endpoints.insert_url.clone(),
            body: String::from_utf8_lossy(&payload).into_owned(),
        });

        match self
            .transport
            .post(&self.endpoints.insert_url, Bytes::from(payload))
            .await
        {
            Ok(response) => {
                self.events.record(ProxyEvent::DownstreamResponse {
                    index: Some(index),
                    status: response.status,
                    query_preview: preview(statement, QUERY_PREVIEW_CHARS),
                    result_preview: preview(&response.body, RESULT_PREVIEW_CHARS),
                });
                QueryResult {
                    insert: statement.to_string(),
                    status: response.status,
                    result: response.body,
                }
            }
            Err(err) => self.failed(statement, index, err.to_string()),
        }
    }

    fn failed(&self, statement: &str, index: usize, message: String) -> QueryResult {
        self.events.record(ProxyEvent::DownstreamFailure {
            index: Some(index),
            message: message.clone(),
        });
        QueryResult {
            insert: statement.to_string(),
            status: TRANSPORT_FAILURE_STATUS,
            result: message,
        }
    }

    /// Forward a procedure payload unchanged to the procedure endpoint.
    ///
    /// The whole request is a single downstream call; its status and body are
    /// returned as-is. Transport failures are returned to the caller.
    pub async fn forward_procedure(
        &self,
        body: Bytes,
    ) -> Result<DownstreamResponse, TransportError> {
        self.events.record(ProxyEvent::DownstreamCall {
            method: "POST",
            url: self.endpoints.procedure_url.clone(),
            body: String::from_utf8_lossy(&body).into_owned(),
        });

        match self.transport.post(&self.endpoints.procedure_url, body).await {
            Ok(response) => {
                self.events.record(ProxyEvent::DownstreamResponse {
                    index: None,
                    status: response.status,
                    query_preview: String::new(),
                    result_preview: preview(&response.body, RESULT_PREVIEW_CHARS),
                });
                Ok(response)
            }
            Err(err) => {
                self.events.record(ProxyEvent::DownstreamFailure {
                    index: None,
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }
}

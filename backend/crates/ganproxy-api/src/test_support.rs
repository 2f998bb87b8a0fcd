//! In-memory downstream used by the handler tests

use actix_web::web;
use async_trait::async_trait;
use bytes::Bytes;
use ganproxy_core::{
    BatchExecutor, DownstreamEndpoints, DownstreamResponse, MemoryEventSink, OracleTransport,
    RecordValidator, TransportError,
};
use ganproxy_sql::InsertBuilder;
use parking_lot::Mutex;
use std::sync::Arc;

use crate::state::ServerInfo;

/// Records every call; bodies containing `FAIL` fail to connect, `BAD` gets 400.
#[derive(Default)]
pub(crate) struct StubTransport {
    calls: Mutex<Vec<(String, String)>>,
}

impl StubTransport {
    pub(crate) fn bodies(&self) -> Vec<String> {
        self.calls.lock().iter().map(|(_, b)| b.clone()).collect()
    }

    pub(crate) fn urls(&self) -> Vec<String> {
        self.calls.lock().iter().map(|(u, _)| u.clone()).collect()
    }
}

#[async_trait]
impl OracleTransport for StubTransport {
    async fn post(&self, url: &str, body: Bytes) -> Result<DownstreamResponse, TransportError> {
        let text = String::from_utf8_lossy(&body).into_owned();
        self.calls.lock().push((url.to_string(), text.clone()));

        if text.contains("FAIL") {
            return Err(TransportError::Connect("connection refused".to_string()));
        }
        if text.contains("BAD") {
            return Ok(DownstreamResponse {
                status: 400,
                body: "ORA-06550: PLS-00201".to_string(),
                content_type: Some("text/plain; charset=utf-8".to_string()),
            });
        }
        Ok(DownstreamResponse {
            status: 200,
            body: r#"{"rowsAffected":1}"#.to_string(),
            content_type: Some("application/json".to_string()),
        })
    }
}

pub(crate) struct TestComponents {
    pub transport: Arc<StubTransport>,
    pub events: Arc<MemoryEventSink>,
    validator: Arc<RecordValidator>,
    builder: Arc<InsertBuilder>,
    executor: Arc<BatchExecutor>,
    info: Arc<ServerInfo>,
}

impl TestComponents {
    pub(crate) fn new() -> Self {
        let transport = Arc::new(StubTransport::default());
        let events = Arc::new(MemoryEventSink::new());
        let executor = BatchExecutor::new(
            transport.clone(),
            DownstreamEndpoints {
                insert_url: "http://oracle.test/exec".to_string(),
                procedure_url: "http://oracle.test/procedure".to_string(),
            },
            events.clone(),
        );
        Self {
            validator: Arc::new(RecordValidator::new(events.clone())),
            builder: Arc::new(InsertBuilder::default()),
            executor: Arc::new(executor),
            info: Arc::new(ServerInfo::new(None)),
            transport,
            events,
        }
    }

    pub(crate) fn register(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.validator.clone()))
            .app_data(web::Data::new(self.builder.clone()))
            .app_data(web::Data::new(self.executor.clone()))
            .app_data(web::Data::new(self.info.clone()));
    }
}

//! Shared harness for the proxy integration tests
//!
//! [`FakeOracle`] stands in for the downstream execution API on an ephemeral
//! port and records every call. [`start_proxy`] boots the real server against it.

#![allow(dead_code)]

use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use ganproxy_configs::ServerConfig;
use ganproxy_server::lifecycle::{bootstrap, run_for_tests, RunningTestHttpServer};
use parking_lot::Mutex;
use serde_json::Value as JsonValue;
use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

pub const TEST_TOKEN: &str = "integration-token";

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

type CallLog = Arc<Mutex<Vec<RecordedCall>>>;

pub struct FakeOracle {
    pub port: u16,
    calls: CallLog,
    server_handle: actix_web::dev::ServerHandle,
}

impl FakeOracle {
    /// Start the fake downstream.
    ///
    /// `/exec` answers 400 for statements on `missing_table`, waits 3s for
    /// `slow_table`, and 200 otherwise. `/procedure` answers a plain-text 500
    /// for `BROKEN_PROC` and a fixed JSON body otherwise.
    pub async fn start() -> Self {
        let listener = TcpListener::bind(("127.0.0.1", 0)).unwrap();
        let port = listener.local_addr().unwrap().port();
        let calls: CallLog = Arc::new(Mutex::new(Vec::new()));

        let app_calls = calls.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(web::Data::new(app_calls.clone()))
                .route("/exec", web::post().to(exec))
                .route("/procedure", web::post().to(procedure))
        })
        .listen(listener)
        .unwrap()
        .workers(1)
        .disable_signals()
        .run();

        let server_handle = server.handle();
        tokio::spawn(server);

        Self {
            port,
            calls,
            server_handle,
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    pub async fn stop(self) {
        self.server_handle.stop(false).await;
    }
}

fn record(req: &HttpRequest, body: &web::Bytes, calls: &CallLog) -> String {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string())
    };
    let text = String::from_utf8_lossy(body).into_owned();
    calls.lock().push(RecordedCall {
        path: req.path().to_string(),
        authorization: header("authorization"),
        content_type: header("content-type"),
        body: text.clone(),
    });
    text
}

async fn exec(req: HttpRequest, body: web::Bytes, calls: web::Data<CallLog>) -> HttpResponse {
    let text = record(&req, &body, &calls);
    let query = serde_json::from_str::<JsonValue>(&text)
        .ok()
        .and_then(|v| v["query"].as_str().map(|q| q.to_string()))
        .unwrap_or_default();

    if query.contains("missing_table") {
        return HttpResponse::BadRequest().body("ORA-00942: table or view does not exist");
    }
    if query.contains("slow_table") {
        actix_web::rt::time::sleep(Duration::from_secs(3)).await;
    }
    HttpResponse::Ok().json(serde_json::json!({ "rowsAffected": 1 }))
}

pub const BROKEN_PROC_ERROR: &str = "ORA-06550: line 1, column 7: PLS-00201";

async fn procedure(req: HttpRequest, body: web::Bytes, calls: web::Data<CallLog>) -> HttpResponse {
    let text = record(&req, &body, &calls);
    if text.contains("BROKEN_PROC") {
        return HttpResponse::InternalServerError()
            .content_type("text/plain; charset=utf-8")
            .body(BROKEN_PROC_ERROR);
    }
    HttpResponse::Ok().json(serde_json::json!({ "status": "executed", "out": { "vTOTAL": 42 } }))
}

/// Proxy config pointing at `oracle_port` on localhost
pub fn proxy_config(oracle_port: u16) -> ServerConfig {
    let mut config = ServerConfig::default();
    config.server.workers = 1;
    config.oracle.host = "127.0.0.1".to_string();
    config.oracle.port = oracle_port;
    config.oracle.token = TEST_TOKEN.to_string();
    config.oracle.request_timeout_seconds = 1;
    config.logging.enabled = false;
    config
}

pub async fn start_proxy(config: &ServerConfig) -> RunningTestHttpServer {
    config.validate().unwrap();
    let components = bootstrap(config, None).unwrap();
    run_for_tests(config, components).await.unwrap()
}

/// A localhost port with nothing listening on it
pub fn closed_port() -> u16 {
    let listener = TcpListener::bind(("127.0.0.1", 0)).unwrap();
    listener.local_addr().unwrap().port()
}

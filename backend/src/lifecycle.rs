//! Server lifecycle management helpers.
//!
//! Bootstrapping the request pipeline, wiring the HTTP server, and
//! coordinating graceful shutdown.

use crate::middleware;
use actix_web::{web, App, HttpServer};
use anyhow::Result;
use ganproxy_api::routes::{configure_routes, public_endpoints};
use ganproxy_api::ServerInfo;
use ganproxy_configs::ServerConfig;
use ganproxy_core::{
    BatchExecutor, DownstreamEndpoints, EventSink, OracleTransport, RecordValidator,
    ReqwestTransport, TracingEventSink,
};
use ganproxy_sql::InsertBuilder;
use log::{debug, info, warn};
use std::net::{SocketAddr, TcpListener};
use std::path::PathBuf;
use std::sync::Arc;

/// Aggregated application components shared by every HTTP worker.
#[derive(Clone)]
pub struct ApplicationComponents {
    pub validator: Arc<RecordValidator>,
    pub insert_builder: Arc<InsertBuilder>,
    pub executor: Arc<BatchExecutor>,
    pub server_info: Arc<ServerInfo>,
}

impl ApplicationComponents {
    fn register(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.validator.clone()))
            .app_data(web::Data::new(self.insert_builder.clone()))
            .app_data(web::Data::new(self.executor.clone()))
            .app_data(web::Data::new(self.server_info.clone()));
    }
}

/// Build the downstream transport and the request pipeline.
pub fn bootstrap(config: &ServerConfig, log_file: Option<PathBuf>) -> Result<ApplicationComponents> {
    let transport = ReqwestTransport::new(config.oracle.token.clone(), config.oracle.request_timeout())
        .map_err(|e| anyhow::anyhow!("Failed to build Oracle HTTP client: {}", e))?;
    Ok(bootstrap_with_transport(config, Arc::new(transport), log_file))
}

/// Same as [`bootstrap`] with a caller-supplied transport.
pub fn bootstrap_with_transport(
    config: &ServerConfig,
    transport: Arc<dyn OracleTransport>,
    log_file: Option<PathBuf>,
) -> ApplicationComponents {
    let events: Arc<dyn EventSink> = Arc::new(TracingEventSink);
    let endpoints = DownstreamEndpoints {
        insert_url: config.oracle.insert_url(),
        procedure_url: config.oracle.procedure_url(),
    };
    debug!(
        "Downstream endpoints: insert={}, procedure={}, timeout={}s",
        endpoints.insert_url, endpoints.procedure_url, config.oracle.request_timeout_seconds
    );

    ApplicationComponents {
        validator: Arc::new(RecordValidator::new(events.clone())),
        insert_builder: Arc::new(InsertBuilder::new(config.oracle.schema.clone())),
        executor: Arc::new(BatchExecutor::new(transport, endpoints, events)),
        server_info: Arc::new(ServerInfo::new(log_file)),
    }
}

fn worker_count(config: &ServerConfig) -> usize {
    if config.server.workers == 0 {
        num_cpus::get()
    } else {
        config.server.workers
    }
}

fn log_startup_banner(config: &ServerConfig, components: &ApplicationComponents) {
    let log_file = components
        .server_info
        .log_file
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "disabled".to_string());

    info!("╔═══════════════════════════════════════════════════════════════╗");
    info!("║           GanProxy Server v{:<36} ║", components.server_info.version);
    info!("╠═══════════════════════════════════════════════════════════════╣");
    info!("║  Listening:  {:<49} ║", config.bind_addr());
    info!("║  Oracle:     {:<49} ║", config.oracle.base_url());
    info!("║  Schema:     {:<49} ║", config.oracle.schema);
    info!("║  Token:      {:<49} ║", config.oracle.masked_token());
    info!("║  Log file:   {:<49} ║", log_file);
    info!("╚═══════════════════════════════════════════════════════════════╝");
    for endpoint in public_endpoints() {
        info!("  {}", endpoint);
    }
}

/// Resolves when the process is asked to stop; returns the signal name.
#[cfg(unix)]
async fn shutdown_signal() -> &'static str {
    use tokio::signal::unix::{signal, SignalKind};
    match signal(SignalKind::terminate()) {
        Ok(mut term) => {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => "Ctrl+C",
                _ = term.recv() => "SIGTERM",
            }
        }
        Err(e) => {
            warn!("Cannot listen for SIGTERM: {}", e);
            let _ = tokio::signal::ctrl_c().await;
            "Ctrl+C"
        }
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() -> &'static str {
    let _ = tokio::signal::ctrl_c().await;
    "Ctrl+C"
}

/// Start the HTTP server and manage graceful shutdown.
pub async fn run(config: &ServerConfig, components: ApplicationComponents) -> Result<()> {
    let bind_addr = config.bind_addr();
    info!("Starting HTTP server on {}", bind_addr);
    info!(
        "Server config: workers={}, body_limit={}KB, cors={}",
        worker_count(config),
        config.limits.max_body_bytes / 1024,
        if config.cors.enabled { "enabled" } else { "disabled" }
    );
    log_startup_banner(config, &components);

    let cors_config = config.cors.clone();
    let body_limit = config.limits.max_body_bytes;
    let app_components = components.clone();

    let server = HttpServer::new(move || {
        let components = app_components.clone();
        App::new()
            .wrap(middleware::internal_error_renderer())
            .wrap(middleware::request_logger())
            .wrap(middleware::cors_layer(&cors_config))
            .app_data(web::PayloadConfig::new(body_limit))
            .configure(|cfg| components.register(cfg))
            .configure(configure_routes)
    })
    .bind(&bind_addr)?
    .workers(worker_count(config))
    .disable_signals()
    .run();

    let server_handle = server.handle();
    let server_task = tokio::spawn(server);

    tokio::select! {
        result = server_task => {
            match result {
                Ok(Err(e)) => log::error!("Server error: {}", e),
                Err(e) => log::error!("Server task failed: {}", e),
                Ok(Ok(())) => {}
            }
        }
        signal = shutdown_signal() => {
            info!("Received {}, initiating graceful shutdown...", signal);
            server_handle.stop(true).await;
            debug!("Graceful shutdown complete");
        }
    }

    info!(
        "═══ Session closed after {:.1}s ═══",
        components.server_info.uptime_seconds()
    );
    info!("Server shutdown complete");
    Ok(())
}

/// A running HTTP server instance intended for integration tests.
///
/// Same app wiring as the production server (middleware stack, route
/// registration, app_data) but bound to an ephemeral port with an explicit
/// shutdown handle.
pub struct RunningTestHttpServer {
    pub base_url: String,
    pub bind_addr: SocketAddr,
    server_handle: actix_web::dev::ServerHandle,
    server_task: tokio::task::JoinHandle<std::io::Result<()>>,
}

impl RunningTestHttpServer {
    pub async fn shutdown(self) {
        self.server_handle.stop(false).await;
        let _ = self.server_task.await;
    }
}

/// Start the HTTP server for integration tests on a random available port.
///
/// Notes:
/// - Does not install signal handling.
/// - Caller must invoke `shutdown()` to stop the server.
pub async fn run_for_tests(
    config: &ServerConfig,
    components: ApplicationComponents,
) -> Result<RunningTestHttpServer> {
    let listener = TcpListener::bind(("127.0.0.1", 0))?;
    let bind_addr = listener.local_addr()?;

    let cors_config = config.cors.clone();
    let body_limit = config.limits.max_body_bytes;

    let server = HttpServer::new(move || {
        let components = components.clone();
        App::new()
            .wrap(middleware::internal_error_renderer())
            .wrap(middleware::request_logger())
            .wrap(middleware::cors_layer(&cors_config))
            .app_data(web::PayloadConfig::new(body_limit))
            .configure(|cfg| components.register(cfg))
            .configure(configure_routes)
    })
    .listen(listener)?
    .workers(worker_count(config))
    .disable_signals()
    .run();

    let server_handle = server.handle();
    let server_task = tokio::spawn(server);
    let base_url = format!("http://{}", bind_addr);

    Ok(RunningTestHttpServer {
        base_url,
        bind_addr,
        server_handle,
        server_task,
    })
}

//! Route configuration for the proxy

use actix_web::web;

use crate::handlers;

pub const CONVERT_PATH: &str = "/api/oracle/convert";
pub const PROCEDURE_PATH: &str = "/api/oracle/procedure";

/// Endpoints advertised by the health check and the startup banner
pub fn public_endpoints() -> Vec<String> {
    vec![
        "GET /health".to_string(),
        "GET /ping".to_string(),
        format!("POST {}", CONVERT_PATH),
        format!("POST {}", PROCEDURE_PATH),
    ]
}

/// Configure all proxy routes
///
/// Expects `RecordValidator`, `InsertBuilder`, `BatchExecutor` and `ServerInfo`
/// to be registered as `web::Data<Arc<_>>` on the app.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(handlers::health_handler))
        .route("/ping", web::get().to(handlers::health_handler))
        .service(
            web::resource(CONVERT_PATH)
                .route(web::post().to(handlers::convert_handler))
                .default_service(web::to(handlers::api_method_fallback)),
        )
        .service(
            web::resource(PROCEDURE_PATH)
                .route(web::post().to(handlers::procedure_handler))
                .default_service(web::to(handlers::api_method_fallback)),
        )
        .default_service(web::to(handlers::route_not_found));
}

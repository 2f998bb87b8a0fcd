//! GET /health and GET /ping

use actix_web::{web, HttpResponse};
use chrono::{SecondsFormat, Utc};
use std::sync::Arc;

use crate::models::{HealthResponse, HealthServerInfo};
use crate::routes::public_endpoints;
use crate::state::ServerInfo;

pub async fn health_handler(info: web::Data<Arc<ServerInfo>>) -> HttpResponse {
    let log_file = info
        .log_file
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "disabled".to_string());

    HttpResponse::Ok().json(HealthResponse {
        status: "OK".to_string(),
        message: "GanProxy server is running".to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        server_info: HealthServerInfo {
            version: info.version.clone(),
            uptime_seconds: info.uptime_seconds(),
            log_file,
        },
        endpoints: public_endpoints(),
    })
}

#[cfg(test)]
mod tests {
    use crate::routes::configure_routes;
    use crate::test_support::TestComponents;
    use actix_web::{test, App};
    use serde_json::Value as JsonValue;

    #[actix_web::test]
    async fn test_health_and_ping_share_a_body() {
        let components = TestComponents::new();
        let app = test::init_service(
            App::new()
                .configure(|cfg| components.register(cfg))
                .configure(configure_routes),
        )
        .await;

        for uri in ["/health", "/ping"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), 200, "{}", uri);

            let body: JsonValue = test::read_body_json(resp).await;
            assert_eq!(body["status"], "OK");
            assert_eq!(body["server_info"]["log_file"], "disabled");
            assert_eq!(body["server_info"]["version"], env!("CARGO_PKG_VERSION"));
            let endpoints = body["endpoints"].as_array().unwrap();
            assert!(endpoints.iter().any(|e| e == "POST /api/oracle/convert"));
        }
    }
}

//! POST /api/oracle/procedure
//!
//! The payload is validated, then the original bytes are forwarded to the
//! procedure endpoint in a single call. The downstream status and body are
//! relayed back unchanged.

use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use ganproxy_core::{BatchExecutor, RecordValidator};
use std::sync::Arc;

use super::parse_json_body;
use crate::models::{procedure_example, ApiError};

pub async fn procedure_handler(
    body: web::Bytes,
    validator: web::Data<Arc<RecordValidator>>,
    executor: web::Data<Arc<BatchExecutor>>,
) -> HttpResponse {
    match forward(body, &validator, &executor).await {
        Ok(response) => response,
        Err(err) => {
            log::error!("Procedure request failed: {}", err);
            err.to_http_response()
        }
    }
}

async fn forward(
    body: web::Bytes,
    validator: &RecordValidator,
    executor: &BatchExecutor,
) -> Result<HttpResponse, ApiError> {
    let payload = parse_json_body(&body)
        .map_err(|e| ApiError::invalid_json(e.to_string(), &body, procedure_example()))?;

    let calls = validator
        .validate_procedures(&payload)
        .map_err(|e| ApiError::invalid_data(e.to_string(), procedure_example()))?;

    let names: Vec<&str> = calls.iter().map(|c| c.name.as_str()).collect();
    log::info!("Forwarding procedure call(s) {:?} to {}", names, executor.endpoints().procedure_url);

    let response = executor
        .forward_procedure(body)
        .await
        .map_err(|e| ApiError::Upstream(e.to_string()))?;

    if response.is_success() {
        log::info!("Procedure executed successfully");
    } else {
        log::error!("Oracle server returned {}", response.status);
    }

    // 2xx collapses to 200; other statuses are relayed as received.
    let status = if response.is_success() {
        StatusCode::OK
    } else {
        StatusCode::from_u16(response.status).unwrap_or(StatusCode::BAD_GATEWAY)
    };

    let mut relayed = HttpResponse::build(status);
    if let Some(content_type) = response.content_type {
        relayed.content_type(content_type);
    }
    Ok(relayed.body(response.body))
}

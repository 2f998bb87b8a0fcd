//! POST /api/oracle/convert
//!
//! Validate the batch, generate every INSERT up front, then execute them one
//! by one. Validation and generation failures reject the whole request before
//! anything is sent downstream.

use actix_web::{web, HttpResponse};
use ganproxy_core::{BatchExecutor, ProcessingSummary, RecordValidator};
use ganproxy_sql::InsertBuilder;
use std::sync::Arc;

use super::parse_json_body;
use crate::models::{insert_example, ApiError};

pub async fn convert_handler(
    body: web::Bytes,
    validator: web::Data<Arc<RecordValidator>>,
    builder: web::Data<Arc<InsertBuilder>>,
    executor: web::Data<Arc<BatchExecutor>>,
) -> HttpResponse {
    match convert(&body, &validator, &builder, &executor).await {
        Ok(summary) => {
            log::info!(
                "Request processed: total={}, successful={}, failed={}",
                summary.total,
                summary.successful,
                summary.failed
            );
            HttpResponse::Ok().json(summary)
        }
        Err(err) => {
            log::error!("Convert request rejected: {}", err);
            err.to_http_response()
        }
    }
}

async fn convert(
    body: &[u8],
    validator: &RecordValidator,
    builder: &InsertBuilder,
    executor: &BatchExecutor,
) -> Result<ProcessingSummary, ApiError> {
    let payload = parse_json_body(body)
        .map_err(|e| ApiError::invalid_json(e.to_string(), body, insert_example()))?;

    let records = validator
        .validate_inserts(&payload)
        .map_err(|e| ApiError::invalid_data(e.to_string(), insert_example()))?;

    log::info!("Generating INSERTs for {} records", records.len());
    let statements = builder
        .build_inserts(&records)
        .map_err(|e| ApiError::invalid_data(e.to_string(), insert_example()))?;

    Ok(executor.execute(&statements).await)
}

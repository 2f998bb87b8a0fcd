//! Error responses for the proxy endpoints
//!
//! Every error body has the same envelope:
//!
//! ```json
//! {
//!   "error": "Invalid data",
//!   "message": "Element 2: must be an object with a non-empty 'tableName'",
//!   "timestamp": "2025-03-15T10:20:30.123Z",
//!   "example": [ ... ]
//! }
//! ```

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use chrono::{SecondsFormat, Utc};
use ganproxy_core::events::preview;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use thiserror::Error;

/// Characters of the raw body echoed back when it is not valid JSON
const RECEIVED_BODY_PREVIEW_CHARS: usize = 200;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub timestamp: String,
    /// Endpoint-specific extras (`example`, `receivedBody`)
    #[serde(flatten)]
    pub details: Map<String, JsonValue>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            details: Map::new(),
        }
    }

    pub fn with_detail(mut self, key: &str, value: JsonValue) -> Self {
        self.details.insert(key.to_string(), value);
        self
    }
}

/// Failures a handler reports to the client instead of a normal response
#[derive(Error, Debug, Clone)]
pub enum ApiError {
    #[error("Request body must be valid JSON: {reason}")]
    InvalidJson {
        reason: String,
        received_body: String,
        example: JsonValue,
    },

    #[error("{message}")]
    InvalidData { message: String, example: JsonValue },

    #[error("Could not reach the Oracle server: {0}")]
    Upstream(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn invalid_json(reason: impl Into<String>, raw_body: &[u8], example: JsonValue) -> Self {
        ApiError::InvalidJson {
            reason: reason.into(),
            received_body: preview(&String::from_utf8_lossy(raw_body), RECEIVED_BODY_PREVIEW_CHARS),
            example,
        }
    }

    pub fn invalid_data(message: impl Into<String>, example: JsonValue) -> Self {
        ApiError::InvalidData {
            message: message.into(),
            example,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidJson { .. } | ApiError::InvalidData { .. } => StatusCode::BAD_REQUEST,
            ApiError::Upstream(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_error_response(&self) -> ErrorResponse {
        match self {
            ApiError::InvalidJson {
                received_body,
                example,
                ..
            } => ErrorResponse::new("Invalid JSON", "The request body must be valid JSON")
                .with_detail("receivedBody", JsonValue::String(received_body.clone()))
                .with_detail("example", example.clone()),
            ApiError::InvalidData { message, example } => {
                ErrorResponse::new("Invalid data", message.clone())
                    .with_detail("example", example.clone())
            }
            ApiError::Upstream(_) => {
                ErrorResponse::new("Connection error", "Could not reach the Oracle server")
            }
            ApiError::Internal(message) => ErrorResponse::new("Internal error", message.clone()),
        }
    }

    pub fn to_http_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.to_error_response())
    }
}

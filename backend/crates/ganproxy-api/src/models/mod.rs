//! Response models and request examples

mod error_response;
mod examples;
mod health_response;

pub use error_response::{ApiError, ErrorResponse};
pub use examples::{insert_example, procedure_example};
pub use health_response::{HealthResponse, HealthServerInfo};

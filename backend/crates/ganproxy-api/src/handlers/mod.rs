//! HTTP request handlers
//!
//! Handlers receive their collaborators (`RecordValidator`, `InsertBuilder`,
//! `BatchExecutor`, `ServerInfo`) as `web::Data<Arc<_>>` registered by the server.

mod convert;
mod fallback;
mod health;
mod procedure;

pub use convert::convert_handler;
pub use fallback::{api_method_fallback, route_not_found};
pub use health::health_handler;
pub use procedure::procedure_handler;

use ganproxy_core::events::preview;
use serde_json::Value as JsonValue;

/// Characters of the incoming body written to the log
const BODY_LOG_PREVIEW_CHARS: usize = 200;

/// Parse the raw body as JSON, logging a short preview first.
fn parse_json_body(body: &[u8]) -> Result<JsonValue, serde_json::Error> {
    log::info!(
        "Body received ({} bytes): {}",
        body.len(),
        preview(&String::from_utf8_lossy(body), BODY_LOG_PREVIEW_CHARS)
    );
    serde_json::from_slice(body)
}

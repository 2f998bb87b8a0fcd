//! ganproxy-api
//!
//! HTTP surface of the proxy:
//! - GET  /health, /ping       - liveness and server info
//! - POST /api/oracle/convert  - JSON records to Oracle INSERTs, executed sequentially
//! - POST /api/oracle/procedure - stored procedure calls, forwarded verbatim

pub mod handlers;
pub mod models;
pub mod routes;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;

pub use routes::configure_routes;
pub use state::ServerInfo;

//! ganproxy-core
//!
//! The request pipeline between the HTTP gateway and the downstream Oracle
//! execution API:
//!
//! - [`validator::RecordValidator`] checks insert and procedure batches
//! - [`executor::BatchExecutor`] sends statements one at a time and aggregates results
//! - [`transport::OracleTransport`] is the seam to the downstream HTTP service
//! - [`events::EventSink`] is the injected logging collaborator

pub mod error;
pub mod events;
pub mod executor;
pub mod models;
pub mod procedure;
pub mod transport;
pub mod validator;

pub use error::{TransportError, ValidationError};
pub use events::{EventSink, MemoryEventSink, ProxyEvent, TracingEventSink};
pub use executor::{BatchExecutor, DownstreamEndpoints};
pub use models::{DownstreamResponse, ProcessingSummary, QueryResult, TRANSPORT_FAILURE_STATUS};
pub use procedure::{ParamDirection, ProcedureCall, ProcedureParameter};
pub use transport::{OracleTransport, ReqwestTransport};
pub use validator::RecordValidator;

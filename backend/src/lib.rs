//! GanProxy Server Library
//!
//! Exposes the server modules for the binary and for integration testing.

pub mod cli;
pub mod lifecycle;
pub mod logging;
pub mod middleware;

//! ganproxy-configs
//!
//! Server configuration types and loader for GanProxy.

pub mod config;

pub use config::defaults;
pub use config::*;

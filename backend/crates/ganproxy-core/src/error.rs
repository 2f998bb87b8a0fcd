//! Error types for ganproxy-core

use thiserror::Error;

/// A rejected batch. Positions are 1-based.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The payload as a whole has the wrong shape
    #[error("{reason}")]
    Shape { reason: String },

    #[error("Element {index}: {reason}")]
    Element { index: usize, reason: String },

    #[error("Element {index}, parameter {param}: {reason}")]
    Parameter {
        index: usize,
        param: usize,
        reason: String,
    },
}

impl ValidationError {
    pub fn shape(reason: impl Into<String>) -> Self {
        ValidationError::Shape {
            reason: reason.into(),
        }
    }

    pub fn element(index: usize, reason: impl Into<String>) -> Self {
        ValidationError::Element {
            index,
            reason: reason.into(),
        }
    }

    pub fn parameter(index: usize, param: usize, reason: impl Into<String>) -> Self {
        ValidationError::Parameter {
            index,
            param,
            reason: reason.into(),
        }
    }

    /// 1-based element position, when the error concerns a single element
    pub fn index(&self) -> Option<usize> {
        match self {
            ValidationError::Shape { .. } => None,
            ValidationError::Element { index, .. } | ValidationError::Parameter { index, .. } => {
                Some(*index)
            }
        }
    }

    /// 1-based parameter position, when the error concerns a procedure parameter
    pub fn param_index(&self) -> Option<usize> {
        match self {
            ValidationError::Parameter { param, .. } => Some(*param),
            _ => None,
        }
    }
}

/// Failure to obtain any HTTP response from the downstream service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("{0}")]
    Request(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout(err.to_string())
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else {
            TransportError::Request(err.to_string())
        }
    }
}

//! Error types for SQL generation

use thiserror::Error;

/// Errors raised while turning a single record into an INSERT statement
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationError {
    #[error("'tableName' is required and must be a non-empty string")]
    MissingTableName,

    #[error("at least one field besides 'tableName' is required")]
    EmptyFieldSet,
}

/// A generation failure inside a batch, tagged with the 1-based record position.
///
/// Batch generation is fail-fast: the first failing record aborts the whole batch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Element {index}: {source}")]
pub struct BatchGenerationError {
    pub index: usize,
    #[source]
    pub source: GenerationError,
}

/// Result type for SQL generation
pub type Result<T> = std::result::Result<T, GenerationError>;

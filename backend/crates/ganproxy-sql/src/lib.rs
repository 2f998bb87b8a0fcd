//! ganproxy-sql
//!
//! Turns structured JSON records into Oracle SQL text.
//!
//! - [`encode_value`] renders a single JSON scalar as an Oracle literal.
//! - [`InsertBuilder`] renders one [`TableRecord`] as an `INSERT INTO <schema>.<table>` statement.

pub mod builder;
pub mod encoder;
pub mod error;

pub use builder::{InsertBuilder, TableRecord, DEFAULT_SCHEMA, TABLE_NAME_KEY};
pub use encoder::{encode_optional, encode_value, is_date_literal, NULL_LITERAL, ORACLE_DATE_FORMAT};
pub use error::{BatchGenerationError, GenerationError};

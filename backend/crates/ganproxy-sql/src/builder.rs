//! INSERT statement generation
//!
//! A record is a JSON object carrying a `tableName` discriminator plus the
//! columns to insert. Column order follows the object's key order.

use crate::encoder::encode_value;
use crate::error::{BatchGenerationError, GenerationError, Result};
use serde_json::{Map, Value as JsonValue};

/// Key holding the target table in every record
pub const TABLE_NAME_KEY: &str = "tableName";

/// Schema prefix used when none is configured
pub const DEFAULT_SCHEMA: &str = "GANANCIAS";

/// One row to insert, split into its table name and ordered columns
#[derive(Debug, Clone, PartialEq)]
pub struct TableRecord {
    table_name: String,
    columns: Vec<(String, JsonValue)>,
}

impl TableRecord {
    /// Split a JSON object into table name and columns, preserving key order.
    pub fn from_object(object: &Map<String, JsonValue>) -> Result<Self> {
        let table_name = match object.get(TABLE_NAME_KEY) {
            Some(JsonValue::String(name)) if !name.is_empty() => name.clone(),
            _ => return Err(GenerationError::MissingTableName),
        };

        let columns: Vec<(String, JsonValue)> = object
            .iter()
            .filter(|(key, _)| key.as_str() != TABLE_NAME_KEY)
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        if columns.is_empty() {
            return Err(GenerationError::EmptyFieldSet);
        }

        Ok(Self { table_name, columns })
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn columns(&self) -> &[(String, JsonValue)] {
        &self.columns
    }
}

/// Builds `INSERT INTO <schema>.<table> (...) VALUES (...)` statements.
///
/// Column names are written as given; only values go through literal encoding.
#[derive(Debug, Clone)]
pub struct InsertBuilder {
    schema: String,
}

impl Default for InsertBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_SCHEMA)
    }
}

impl InsertBuilder {
    pub fn new(schema: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
        }
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// Build a single INSERT from a raw JSON object.
    pub fn build_insert(&self, object: &Map<String, JsonValue>) -> Result<String> {
        let record = TableRecord::from_object(object)?;
        Ok(self.build_record(&record))
    }

    /// Render an already split record.
    pub fn build_record(&self, record: &TableRecord) -> String {
        let columns = record
            .columns()
            .iter()
            .map(|(name, _)| name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let values = record
            .columns()
            .iter()
            .map(|(_, value)| encode_value(value))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "INSERT INTO {}.{} ({}) VALUES ({})",
            self.schema,
            record.table_name(),
            columns,
            values
        )
    }

    /// Build one statement per record, in order. The first failure aborts the batch.
    pub fn build_inserts(
        &self,
        objects: &[Map<String, JsonValue>],
    ) -> std::result::Result<Vec<String>, BatchGenerationError> {
        objects
            .iter()
            .enumerate()
            .map(|(idx, object)| {
                self.build_insert(object).map_err(|source| BatchGenerationError {
                    index: idx + 1,
                    source,
                })
            })
            .collect()
    }
}

//! Shape validation for incoming batches
//!
//! Validation is all-or-nothing and happens before any SQL is generated or any
//! downstream call is made. The first violation found is reported; positions
//! in messages are 1-based.

use crate::error::ValidationError;
use crate::events::{EventSink, ProxyEvent, ValidationMode};
use crate::procedure::{ParamDirection, ProcedureCall, ProcedureParameter};
use serde_json::{Map, Value as JsonValue};
use std::sync::Arc;

const TABLE_NAME_KEY: &str = "tableName";

pub struct RecordValidator {
    events: Arc<dyn EventSink>,
}

impl RecordValidator {
    pub fn new(events: Arc<dyn EventSink>) -> Self {
        Self { events }
    }

    /// Check an insert batch: an array of objects, each with a non-empty `tableName`.
    ///
    /// Returns the objects in input order.
    pub fn validate_inserts(
        &self,
        input: &JsonValue,
    ) -> Result<Vec<Map<String, JsonValue>>, ValidationError> {
        let result = check_inserts(input);
        self.report(ValidationMode::Insert, &result);
        result
    }

    /// Check a procedure batch: a single object (wrapped into a one-element
    /// batch) or an array of procedure descriptors.
    pub fn validate_procedures(
        &self,
        input: &JsonValue,
    ) -> Result<Vec<ProcedureCall>, ValidationError> {
        let result = check_procedures(input);
        self.report(ValidationMode::Procedure, &result);
        result
    }

    fn report<T>(&self, mode: ValidationMode, result: &Result<Vec<T>, ValidationError>) {
        let event = match result {
            Ok(items) => ProxyEvent::ValidationPassed {
                mode,
                count: items.len(),
            },
            Err(err) => ProxyEvent::ValidationRejected {
                mode,
                reason: err.to_string(),
            },
        };
        self.events.record(event);
    }
}

fn check_inserts(input: &JsonValue) -> Result<Vec<Map<String, JsonValue>>, ValidationError> {
    let items = input
        .as_array()
        .ok_or_else(|| ValidationError::shape("Expected an array of objects"))?;

    let mut records = Vec::with_capacity(items.len());
    for (idx, item) in items.iter().enumerate() {
        let object = item
            .as_object()
            .filter(|obj| has_non_empty_string(obj, TABLE_NAME_KEY))
            .ok_or_else(|| {
                ValidationError::element(idx + 1, "must be an object with a non-empty 'tableName'")
            })?;
        records.push(object.clone());
    }
    Ok(records)
}

fn check_procedures(input: &JsonValue) -> Result<Vec<ProcedureCall>, ValidationError> {
    let wrapped;
    let items: &[JsonValue] = match input {
        JsonValue::Array(items) => items,
        JsonValue::Object(_) => {
            wrapped = [input.clone()];
            &wrapped
        }
        _ => {
            return Err(ValidationError::shape(
                "Expected an array of objects or a single object",
            ))
        }
    };

    items
        .iter()
        .enumerate()
        .map(|(idx, item)| check_procedure(idx + 1, item))
        .collect()
}

fn check_procedure(index: usize, item: &JsonValue) -> Result<ProcedureCall, ValidationError> {
    let object = item
        .as_object()
        .ok_or_else(|| ValidationError::element(index, "must be an object"))?;

    let name = non_empty_string(object, "name")
        .ok_or_else(|| ValidationError::element(index, "must have 'name' (string)"))?;

    let is_function = object
        .get("isFunction")
        .and_then(JsonValue::as_bool)
        .ok_or_else(|| ValidationError::element(index, "must have 'isFunction' (boolean)"))?;

    let params = match object.get("params") {
        None | Some(JsonValue::Null) => Vec::new(),
        Some(JsonValue::Array(params)) => params
            .iter()
            .enumerate()
            .map(|(param_idx, param)| check_parameter(index, param_idx + 1, param))
            .collect::<Result<Vec<_>, _>>()?,
        Some(_) => return Err(ValidationError::element(index, "'params' must be an array")),
    };

    Ok(ProcedureCall {
        name: name.to_string(),
        is_function,
        params,
    })
}

fn check_parameter(
    index: usize,
    param_index: usize,
    param: &JsonValue,
) -> Result<ProcedureParameter, ValidationError> {
    let object = param
        .as_object()
        .ok_or_else(|| ValidationError::parameter(index, param_index, "must be an object"))?;

    let name = non_empty_string(object, "name").ok_or_else(|| {
        ValidationError::parameter(index, param_index, "must have 'name' (string)")
    })?;

    let direction = object
        .get("direction")
        .and_then(JsonValue::as_str)
        .and_then(ParamDirection::parse)
        .ok_or_else(|| {
            ValidationError::parameter(
                index,
                param_index,
                "must have 'direction' (IN, OUT, or IN_OUT)",
            )
        })?;

    // An explicit null counts as a value; only an absent key is rejected.
    let value = object.get("value").cloned();
    if direction.requires_value() && value.is_none() {
        return Err(ValidationError::parameter(
            index,
            param_index,
            format!("with direction '{}' must have 'value'", direction),
        ));
    }

    Ok(ProcedureParameter {
        name: name.to_string(),
        value,
        direction,
    })
}

fn non_empty_string<'a>(object: &'a Map<String, JsonValue>, key: &str) -> Option<&'a str> {
    object
        .get(key)
        .and_then(JsonValue::as_str)
        .filter(|s| !s.is_empty())
}

fn has_non_empty_string(object: &Map<String, JsonValue>, key: &str) -> bool {
    non_empty_string(object, key).is_some()
}

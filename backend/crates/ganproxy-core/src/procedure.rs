//! Stored procedure invocation descriptors
//!
//! Procedure batches are forwarded downstream byte-for-byte; these types are
//! the validated view of the payload, used for logging and checks only.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

/// Parameter passing mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParamDirection {
    In,
    Out,
    InOut,
}

impl ParamDirection {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamDirection::In => "IN",
            ParamDirection::Out => "OUT",
            ParamDirection::InOut => "IN_OUT",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "IN" => Some(ParamDirection::In),
            "OUT" => Some(ParamDirection::Out),
            "IN_OUT" => Some(ParamDirection::InOut),
            _ => None,
        }
    }

    /// IN and IN_OUT parameters must carry a value
    #[inline]
    pub fn requires_value(&self) -> bool {
        matches!(self, ParamDirection::In | ParamDirection::InOut)
    }
}

impl fmt::Display for ParamDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcedureParameter {
    pub name: String,
    /// `None` when the key is absent from the payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<JsonValue>,
    pub direction: ParamDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcedureCall {
    pub name: String,
    pub is_function: bool,
    #[serde(default)]
    pub params: Vec<ProcedureParameter>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_parse_and_display() {
        for s in ["IN", "OUT", "IN_OUT"] {
            let dir = ParamDirection::parse(s).unwrap();
            assert_eq!(dir.to_string(), s);
        }
        assert_eq!(ParamDirection::parse("in"), None);
        assert_eq!(ParamDirection::parse("INOUT"), None);
    }

    #[test]
    fn test_requires_value() {
        assert!(ParamDirection::In.requires_value());
        assert!(ParamDirection::InOut.requires_value());
        assert!(!ParamDirection::Out.requires_value());
    }

    #[test]
    fn test_procedure_call_serde_names() {
        let call: ProcedureCall = serde_json::from_value(serde_json::json!({
            "name": "GANANCIAS.MOV.PRINCIPAL_MOVIMIENTOS",
            "isFunction": false,
            "params": [{"name": "vPERIODO", "value": 2025, "direction": "IN_OUT"}]
        }))
        .unwrap();
        assert!(!call.is_function);
        assert_eq!(call.params[0].direction, ParamDirection::InOut);
    }
}

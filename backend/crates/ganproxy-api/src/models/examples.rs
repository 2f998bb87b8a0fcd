//! Example payloads echoed back in 400 responses

use serde_json::{json, Value as JsonValue};

/// Expected shape for POST /api/oracle/convert
pub fn insert_example() -> JsonValue {
    json!([
        {
            "tableName": "usuarios",
            "id": 1,
            "nombre": "Juan"
        }
    ])
}

/// Expected shape for POST /api/oracle/procedure
pub fn procedure_example() -> JsonValue {
    json!([
        {
            "name": "GANANCIAS.MOV.PRINCIPAL_MOVIMIENTOS",
            "isFunction": false,
            "params": [
                {
                    "name": "vPERIODO",
                    "value": 2025,
                    "direction": "IN"
                }
            ]
        }
    ])
}

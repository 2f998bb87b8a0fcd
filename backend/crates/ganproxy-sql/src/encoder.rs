//! JSON value to Oracle SQL literal encoding
//!
//! Rules, applied in order:
//! - `null` (or an absent value) becomes the bare keyword `NULL`
//! - a string shaped like `DD-MM-YYYY` becomes `TO_DATE('<value>', 'DD-MM-YYYY')`
//! - any other string is single-quoted with embedded quotes doubled
//! - numbers and booleans use their plain textual form, unquoted
//!
//! The date check is purely syntactic: `99-99-9999` is treated as a date too.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value as JsonValue;

/// Oracle keyword emitted for missing or null values
pub const NULL_LITERAL: &str = "NULL";

/// Format mask passed to `TO_DATE` for detected dates
pub const ORACLE_DATE_FORMAT: &str = "DD-MM-YYYY";

// ASCII digits only; `\d` would also accept other Unicode digit classes.
static RE_DATE_DD_MM_YYYY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{2}-[0-9]{2}-[0-9]{4}$").unwrap());

/// Returns true when `value` has the `DD-MM-YYYY` shape.
pub fn is_date_literal(value: &str) -> bool {
    RE_DATE_DD_MM_YYYY.is_match(value)
}

/// Encode a JSON value as an Oracle SQL literal.
///
/// Never fails. Arrays and objects are not expected in a record, but when they
/// show up they are written as a quoted string holding their JSON text.
pub fn encode_value(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => NULL_LITERAL.to_string(),
        JsonValue::String(s) => encode_string(s),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::Array(_) | JsonValue::Object(_) => quote(&value.to_string()),
    }
}

/// Encode a possibly absent value; absence is treated exactly like `null`.
pub fn encode_optional(value: Option<&JsonValue>) -> String {
    value.map(encode_value).unwrap_or_else(|| NULL_LITERAL.to_string())
}

fn encode_string(s: &str) -> String {
    if is_date_literal(s) {
        format!("TO_DATE('{}', '{}')", s, ORACLE_DATE_FORMAT)
    } else {
        quote(s)
    }
}

fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_and_absent_are_null_keyword() {
        assert_eq!(encode_value(&JsonValue::Null), "NULL");
        assert_eq!(encode_optional(None), "NULL");
        assert_eq!(encode_optional(Some(&json!(null))), "NULL");
    }

    #[test]
    fn test_numbers_and_booleans_are_unquoted() {
        assert_eq!(encode_value(&json!(42)), "42");
        assert_eq!(encode_value(&json!(-7)), "-7");
        assert_eq!(encode_value(&json!(3.5)), "3.5");
        assert_eq!(encode_value(&json!(true)), "true");
        assert_eq!(encode_value(&json!(false)), "false");
    }

    #[test]
    fn test_number_text_keeps_json_form() {
        // Whole floats keep their fraction; integers never gain one.
        let parsed: JsonValue = serde_json::from_str("[1.0, 10, 0.25, -2.0]").unwrap();
        let rendered: Vec<String> = parsed.as_array().unwrap().iter().map(encode_value).collect();
        assert_eq!(rendered, vec!["1.0", "10", "0.25", "-2.0"]);
        assert_eq!(encode_value(&json!(1.0)), "1.0");
    }

    #[test]
    fn test_plain_strings_are_quoted() {
        assert_eq!(encode_value(&json!("Juan")), "'Juan'");
        assert_eq!(encode_value(&json!("")), "''");
        assert_eq!(encode_value(&json!("2025")), "'2025'");
    }

    #[test]
    fn test_single_quotes_are_doubled() {
        assert_eq!(encode_value(&json!("O'Brien")), "'O''Brien'");
        assert_eq!(encode_value(&json!("'")), "''''");

        let input = "it's 'quoted' text";
        let encoded = encode_value(&json!(input));
        let body = &encoded[1..encoded.len() - 1];
        let quotes_in = input.matches('\'').count();
        assert_eq!(body.matches('\'').count(), quotes_in * 2);
    }

    #[test]
    fn test_date_shaped_strings_use_to_date() {
        assert_eq!(
            encode_value(&json!("15-03-2025")),
            "TO_DATE('15-03-2025', 'DD-MM-YYYY')"
        );
        // Shape only, no calendar check
        assert_eq!(
            encode_value(&json!("99-99-9999")),
            "TO_DATE('99-99-9999', 'DD-MM-YYYY')"
        );
    }

    #[test]
    fn test_near_dates_are_plain_strings() {
        for s in ["2025-03-15", "1-03-2025", "15/03/2025", "15-03-2025 ", " 15-03-2025", "15-03-25"] {
            assert!(!is_date_literal(s), "{s:?} should not be detected as a date");
            assert_eq!(encode_value(&json!(s)), format!("'{}'", s));
        }
        // Non-ASCII digits do not count
        assert!(!is_date_literal("١٥-03-2025"));
    }

    #[test]
    fn test_nested_values_are_quoted_json() {
        assert_eq!(encode_value(&json!([1, 2])), "'[1,2]'");
        assert_eq!(encode_value(&json!({"a": "b'c"})), r#"'{"a":"b''c"}'"#);
    }
}

//! String codec for stored values
//!
//! Every value lives in the store as a string: booleans as the literal
//! tokens `"true"`/`"false"`, numbers as canonical decimal text, strings
//! verbatim. One total encode/decode pair per kind, independent of the
//! store.

use crate::contract::{OptionValue, ValueKind, VariablesError};

/// Encode an already-validated value into its storage text form
pub fn encode(value: &OptionValue) -> String {
    match value {
        OptionValue::Bool(true) => "true".to_string(),
        OptionValue::Bool(false) => "false".to_string(),
        OptionValue::Int(i) => i.to_string(),
        OptionValue::Float(f) => ryu::Buffer::new().format(*f).to_string(),
        OptionValue::Str(s) => s.clone(),
    }
}

/// Decode storage text into the declared kind.
///
/// Writers pre-validate everything they persist, so a numeric field that
/// no longer parses is corruption, not caller error. A stored boolean is
/// `true` only for the exact token `"true"`.
pub fn decode(kind: ValueKind, raw: &str, field: &str) -> Result<OptionValue, VariablesError> {
    match kind {
        ValueKind::Boolean => Ok(OptionValue::Bool(raw == "true")),
        ValueKind::Integer => raw
            .parse::<i64>()
            .map(OptionValue::Int)
            .map_err(|_| corrupt(field, raw)),
        ValueKind::Float => match raw.parse::<f64>() {
            Ok(f) if f.is_finite() => Ok(OptionValue::Float(f)),
            _ => Err(corrupt(field, raw)),
        },
        ValueKind::String => Ok(OptionValue::Str(raw.to_string())),
    }
}

fn corrupt(field: &str, raw: &str) -> VariablesError {
    VariablesError::CorruptValue {
        field: field.to_string(),
        raw: raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_booleans_as_literal_tokens() {
        assert_eq!(encode(&OptionValue::Bool(true)), "true");
        assert_eq!(encode(&OptionValue::Bool(false)), "false");
    }

    #[test]
    fn encodes_numbers_as_decimal_text() {
        assert_eq!(encode(&OptionValue::Int(5)), "5");
        assert_eq!(encode(&OptionValue::Int(-42)), "-42");
        assert_eq!(encode(&OptionValue::Float(3.9)), "3.9");
        assert_eq!(encode(&OptionValue::Float(5.0)), "5.0");
    }

    #[test]
    fn encodes_strings_verbatim() {
        assert_eq!(encode(&OptionValue::Str("string 0".to_string())), "string 0");
    }

    #[test]
    fn boolean_reads_true_only_for_exact_token() {
        assert_eq!(
            decode(ValueKind::Boolean, "true", "flag").expect("decodes"),
            OptionValue::Bool(true)
        );
        for raw in ["false", "TRUE", "1", "yes", ""] {
            assert_eq!(
                decode(ValueKind::Boolean, raw, "flag").expect("decodes"),
                OptionValue::Bool(false),
                "raw {raw:?} must read as false"
            );
        }
    }

    #[test]
    fn numbers_round_trip() {
        let int = decode(ValueKind::Integer, &encode(&OptionValue::Int(8)), "n");
        assert_eq!(int.expect("decodes"), OptionValue::Int(8));
        let float = decode(ValueKind::Float, &encode(&OptionValue::Float(2.1)), "f");
        assert_eq!(float.expect("decodes"), OptionValue::Float(2.1));
    }

    #[test]
    fn unparsable_number_is_corrupt() {
        let err = decode(ValueKind::Integer, "five", "n").unwrap_err();
        assert!(matches!(err, VariablesError::CorruptValue { .. }));
        let err = decode(ValueKind::Float, "NaN", "f").unwrap_err();
        assert!(matches!(err, VariablesError::CorruptValue { .. }));
    }
}

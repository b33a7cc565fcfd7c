//! Declaration-time and write-time validation
//!
//! Constraints bind writes only; reads never re-validate a value that was
//! accepted at write time. Validation completes fully before any store
//! mutation is attempted.

use std::fmt::Display;

use crate::contract::{OptionValue, ValueSchema, VariablesError};

/// Reject a self-contradictory schema at declaration time
pub fn check_schema(schema: &ValueSchema) -> Result<(), VariablesError> {
    match schema {
        ValueSchema::Integer {
            min: Some(min),
            max: Some(max),
        } if min > max => Err(VariablesError::definition(format!(
            "min {min} greater than max {max}"
        ))),
        ValueSchema::Float {
            min: Some(min),
            max: Some(max),
        } if min > max => Err(VariablesError::definition(format!(
            "min {min} greater than max {max}"
        ))),
        _ => Ok(()),
    }
}

/// Reject a default whose kind does not match the schema
pub fn check_default(schema: &ValueSchema, default: &OptionValue) -> Result<(), VariablesError> {
    if default.kind() == schema.kind() {
        Ok(())
    } else {
        Err(VariablesError::definition(format!(
            "default is {} but option kind is {}",
            default.kind(),
            schema.kind()
        )))
    }
}

/// Coerce an untyped write input into the schema's kind and check its
/// constraints. Returns the normalized value ready for encoding.
pub fn coerce(schema: &ValueSchema, value: OptionValue) -> Result<OptionValue, VariablesError> {
    match schema {
        ValueSchema::Boolean => coerce_boolean(value),
        ValueSchema::Integer { min, max } => {
            let accepted = integer_input(value)?;
            check_bounds(accepted, *min, *max)?;
            Ok(OptionValue::Int(accepted))
        }
        ValueSchema::Float { min, max } => {
            let accepted = float_input(value)?;
            check_bounds(accepted, *min, *max)?;
            Ok(OptionValue::Float(accepted))
        }
        ValueSchema::String { one_of } => coerce_string(one_of.as_deref(), value),
    }
}

fn coerce_boolean(value: OptionValue) -> Result<OptionValue, VariablesError> {
    match value {
        OptionValue::Bool(b) => Ok(OptionValue::Bool(b)),
        OptionValue::Str(s) if s == "true" => Ok(OptionValue::Bool(true)),
        OptionValue::Str(s) if s == "false" => Ok(OptionValue::Bool(false)),
        _ => Err(VariablesError::value("Value isn't `true` or `false`")),
    }
}

fn integer_input(value: OptionValue) -> Result<i64, VariablesError> {
    match value {
        OptionValue::Int(i) => Ok(i),
        OptionValue::Str(s) => s.parse::<i64>().map_err(|_| not_a_number()),
        _ => Err(not_a_number()),
    }
}

fn float_input(value: OptionValue) -> Result<f64, VariablesError> {
    let accepted = match value {
        OptionValue::Float(f) => f,
        OptionValue::Int(i) => i as f64,
        OptionValue::Str(s) => s.parse::<f64>().map_err(|_| not_a_number())?,
        OptionValue::Bool(_) => return Err(not_a_number()),
    };
    // Non-finite values have no canonical decimal text form.
    if accepted.is_finite() {
        Ok(accepted)
    } else {
        Err(not_a_number())
    }
}

fn coerce_string(
    one_of: Option<&[String]>,
    value: OptionValue,
) -> Result<OptionValue, VariablesError> {
    let s = match value {
        OptionValue::Str(s) => s,
        other => {
            return Err(VariablesError::value(format!(
                "Value isn't a string, got {}",
                other.kind()
            )))
        }
    };
    if let Some(allowed) = one_of {
        if !allowed.iter().any(|candidate| candidate == &s) {
            return Err(VariablesError::value(format!(
                "Only {allowed:?} values are allowed."
            )));
        }
    }
    Ok(OptionValue::Str(s))
}

// Min is checked before max, and the violated bound lands in the message.
fn check_bounds<T: PartialOrd + Display + Copy>(
    value: T,
    min: Option<T>,
    max: Option<T>,
) -> Result<(), VariablesError> {
    if let Some(min) = min {
        if value < min {
            return Err(VariablesError::value(format!(
                "Value too small. min = {min}"
            )));
        }
    }
    if let Some(max) = max {
        if value > max {
            return Err(VariablesError::value(format!(
                "Value too large. max = {max}"
            )));
        }
    }
    Ok(())
}

fn not_a_number() -> VariablesError {
    VariablesError::value("not a number")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int_schema(min: Option<i64>, max: Option<i64>) -> ValueSchema {
        ValueSchema::Integer { min, max }
    }

    #[test]
    fn boolean_accepts_literals_and_their_string_forms() {
        for (input, expected) in [
            (OptionValue::Bool(true), true),
            (OptionValue::Bool(false), false),
            (OptionValue::from("true"), true),
            (OptionValue::from("false"), false),
        ] {
            let accepted = coerce(&ValueSchema::Boolean, input).expect("accepted");
            assert_eq!(accepted, OptionValue::Bool(expected));
        }
    }

    #[test]
    fn boolean_rejects_everything_else() {
        for input in [
            OptionValue::from("yes"),
            OptionValue::from("TRUE"),
            OptionValue::Int(1),
            OptionValue::Float(0.0),
        ] {
            let err = coerce(&ValueSchema::Boolean, input).unwrap_err();
            assert_eq!(err.to_string(), "Value isn't `true` or `false`");
        }
    }

    #[test]
    fn integer_accepts_strict_textual_numerals() {
        let schema = int_schema(None, None);
        assert_eq!(
            coerce(&schema, OptionValue::from("7")).expect("accepted"),
            OptionValue::Int(7)
        );
        assert_eq!(
            coerce(&schema, OptionValue::Int(-3)).expect("accepted"),
            OptionValue::Int(-3)
        );
    }

    #[test]
    fn integer_rejects_non_numerals() {
        let schema = int_schema(None, None);
        for input in [
            OptionValue::from("7.5"),
            OptionValue::from("seven"),
            OptionValue::from(" 7"),
            OptionValue::Float(7.0),
            OptionValue::Bool(true),
        ] {
            let err = coerce(&schema, input).unwrap_err();
            assert_eq!(err.to_string(), "not a number");
        }
    }

    #[test]
    fn integer_bounds_min_checked_before_max() {
        let schema = int_schema(Some(1), Some(10));
        let err = coerce(&schema, OptionValue::Int(0)).unwrap_err();
        assert_eq!(err.to_string(), "Value too small. min = 1");
        let err = coerce(&schema, OptionValue::Int(11)).unwrap_err();
        assert_eq!(err.to_string(), "Value too large. max = 10");
        assert!(coerce(&schema, OptionValue::Int(1)).is_ok());
        assert!(coerce(&schema, OptionValue::Int(10)).is_ok());
    }

    #[test]
    fn float_bounds_report_the_violated_bound() {
        let schema = ValueSchema::Float {
            min: Some(1.2),
            max: Some(9.3),
        };
        let err = coerce(&schema, OptionValue::Float(1.1)).unwrap_err();
        assert_eq!(err.to_string(), "Value too small. min = 1.2");
        let err = coerce(&schema, OptionValue::Float(9.4)).unwrap_err();
        assert_eq!(err.to_string(), "Value too large. max = 9.3");
    }

    #[test]
    fn float_accepts_integers_and_numeric_text() {
        let schema = ValueSchema::Float {
            min: None,
            max: None,
        };
        assert_eq!(
            coerce(&schema, OptionValue::Int(5)).expect("accepted"),
            OptionValue::Float(5.0)
        );
        assert_eq!(
            coerce(&schema, OptionValue::from("2.1")).expect("accepted"),
            OptionValue::Float(2.1)
        );
    }

    #[test]
    fn float_rejects_non_finite_values() {
        let schema = ValueSchema::Float {
            min: None,
            max: None,
        };
        for input in [
            OptionValue::Float(f64::NAN),
            OptionValue::Float(f64::INFINITY),
            OptionValue::from("inf"),
            OptionValue::from("NaN"),
        ] {
            let err = coerce(&schema, input).unwrap_err();
            assert_eq!(err.to_string(), "not a number");
        }
    }

    #[test]
    fn string_enumeration_names_the_allowed_set() {
        let schema = ValueSchema::String {
            one_of: Some(vec!["string 0".to_string(), "string 1".to_string()]),
        };
        assert!(coerce(&schema, OptionValue::from("string 1")).is_ok());
        let err = coerce(&schema, OptionValue::from("string 2")).unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"Only ["string 0", "string 1"] values are allowed."#
        );
    }

    #[test]
    fn unconstrained_string_accepts_anything() {
        let schema = ValueSchema::String { one_of: None };
        assert!(coerce(&schema, OptionValue::from("any")).is_ok());
    }

    #[test]
    fn schema_with_inverted_bounds_is_invalid() {
        let err = check_schema(&int_schema(Some(10), Some(1))).unwrap_err();
        assert!(matches!(err, VariablesError::InvalidDefinition { .. }));
        let err = check_schema(&ValueSchema::Float {
            min: Some(9.3),
            max: Some(1.2),
        })
        .unwrap_err();
        assert!(matches!(err, VariablesError::InvalidDefinition { .. }));
        assert!(check_schema(&int_schema(Some(1), Some(1))).is_ok());
    }

    #[test]
    fn default_must_match_the_declared_kind() {
        let err = check_default(&ValueSchema::Boolean, &OptionValue::Int(1)).unwrap_err();
        assert!(matches!(err, VariablesError::InvalidDefinition { .. }));
        assert!(check_default(&ValueSchema::Boolean, &OptionValue::Bool(true)).is_ok());
    }
}

//! Helpers for loosely-typed JSON field values.
//!
//! Log producers are not consistent about field types: a status code may be a
//! number or a string, a stack may be a string or an array. These helpers give
//! every field one well-defined coercion.

use serde_json::Value;

/// Loose truthiness: `null`, `false`, `0`, and `""` are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Renders a value as display text. Strings are taken verbatim; everything
/// else uses its compact JSON form.
pub fn to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Integer parse with leading-prefix semantics.
///
/// Numbers truncate toward zero. Strings skip leading whitespace, accept an
/// optional sign and then as many ASCII digits as follow; `"12.7ms"` yields
/// `12`. Returns `None` when no digits are found.
pub fn parse_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => parse_int_prefix(s),
        _ => None,
    }
}

fn parse_int_prefix(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }
    let magnitude = rest[..digits_end].parse::<i64>().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn truthiness() {
        for falsy in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert!(!is_truthy(&falsy), "{falsy} should be falsy");
        }
        for truthy in [json!(true), json!(1), json!("0"), json!([]), json!({})] {
            assert!(is_truthy(&truthy), "{truthy} should be truthy");
        }
    }

    #[test]
    fn text_coercion() {
        assert_eq!(to_text(&json!("GET")), "GET");
        assert_eq!(to_text(&json!(200)), "200");
        assert_eq!(to_text(&json!({"a": 1})), r#"{"a":1}"#);
    }

    #[test]
    fn int_parse_prefix() {
        assert_eq!(parse_int(&json!(250)), Some(250));
        assert_eq!(parse_int(&json!(12.9)), Some(12));
        assert_eq!(parse_int(&json!("  42")), Some(42));
        assert_eq!(parse_int(&json!("12.7ms")), Some(12));
        assert_eq!(parse_int(&json!("-5")), Some(-5));
        assert_eq!(parse_int(&json!("ms")), None);
        assert_eq!(parse_int(&json!("")), None);
        assert_eq!(parse_int(&json!(true)), None);
    }
}

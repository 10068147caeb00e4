//! Structured values and the loose scalar comparison used by requirement matching.
//!
//! Both configured requirements and inbound payloads are plain JSON documents,
//! so the data model is [`serde_json::Value`]. Object keys keep their insertion
//! order (for display only; matching never looks at key order).
//!
//! Scalar requirements are compared with [`loose_eq`], a coercing equality in
//! the spirit of the `==` operator found in dynamic languages: `8` equals `"8"`,
//! `true` equals `1`, and so on. Some surprising pairs compare equal as well
//! (`"0"` and `false`, `[]` and `0`); hook authors who need exact matches
//! should compare strings against strings.

use serde_json::Value;

/// The generic data model shared by requirements and payloads.
pub type StructuredValue = Value;

/// Primitive view of a value, after reducing arrays and objects to strings.
#[derive(Debug, Clone, PartialEq)]
enum Primitive {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
}

impl Primitive {
    fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => Primitive::Null,
            Value::Bool(b) => Primitive::Bool(*b),
            Value::Number(n) => Primitive::Number(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => Primitive::String(s.clone()),
            Value::Array(_) | Value::Object(_) => Primitive::String(primitive_string(value)),
        }
    }
}

/// Compare two values with type coercion.
///
/// Rules, applied in order:
/// - `null` equals only `null`
/// - booleans are turned into `0`/`1` and compared again
/// - arrays and objects are reduced to their string form first
/// - a number and a string compare numerically (see [`to_number`])
/// - same-typed scalars compare directly; `NaN` equals nothing
pub fn loose_eq(left: &Value, right: &Value) -> bool {
    primitive_eq(&Primitive::from_value(left), &Primitive::from_value(right))
}

fn primitive_eq(left: &Primitive, right: &Primitive) -> bool {
    match (left, right) {
        (Primitive::Null, Primitive::Null) => true,
        (Primitive::Null, _) | (_, Primitive::Null) => false,
        (Primitive::Bool(a), Primitive::Bool(b)) => a == b,
        (Primitive::Bool(b), other) => primitive_eq(&Primitive::Number(bool_number(*b)), other),
        (other, Primitive::Bool(b)) => primitive_eq(other, &Primitive::Number(bool_number(*b))),
        (Primitive::Number(a), Primitive::Number(b)) => a == b,
        (Primitive::String(a), Primitive::String(b)) => a == b,
        (Primitive::Number(n), Primitive::String(s)) | (Primitive::String(s), Primitive::Number(n)) => {
            *n == to_number(s)
        }
    }
}

fn bool_number(b: bool) -> f64 {
    if b { 1.0 } else { 0.0 }
}

/// Convert a string to a number the way a coercing comparison does.
///
/// Surrounding whitespace is ignored and an empty string is `0`. Accepted forms
/// are decimal literals with optional sign, fraction and exponent, `Infinity`
/// with optional sign, and unsigned `0x`/`0o`/`0b` integer literals. Anything
/// else yields `NaN`.
pub fn to_number(input: &str) -> f64 {
    let s = input.trim();
    if s.is_empty() {
        return 0.0;
    }

    let radix = match s.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &s[2..];
        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
            return f64::NAN;
        }
        return digits
            .chars()
            .filter_map(|c| c.to_digit(radix))
            .fold(0.0, |acc, d| acc * f64::from(radix) + f64::from(d));
    }

    let (sign, unsigned) = match s.as_bytes()[0] {
        b'-' => (-1.0, &s[1..]),
        b'+' => (1.0, &s[1..]),
        _ => (1.0, s),
    };
    if unsigned == "Infinity" {
        return sign * f64::INFINITY;
    }
    if !is_decimal_literal(unsigned) {
        return f64::NAN;
    }
    unsigned.parse::<f64>().map(|n| sign * n).unwrap_or(f64::NAN)
}

/// `digits [. digits] [e [sign] digits]`, where either side of the dot may be empty
/// but not both.
fn is_decimal_literal(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        digits += i - frac_start;
    }
    if digits == 0 {
        return false;
    }
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;
        if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }
    i == bytes.len()
}

/// String form of a value when it takes part in a coercing comparison.
fn primitive_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_string(n.as_f64().unwrap_or(f64::NAN)),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(primitive_string)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn number_string(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n == n.trunc() && n.abs() < 1e21 {
        format!("{}", n as i128)
    } else {
        n.to_string()
    }
}

/// Whether a value can be used as a scope for a nested requirement.
///
/// Objects and arrays qualify; arrays expose their indices as keys.
pub fn is_mapping(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

/// Look up `key` in a mapping-compatible value.
///
/// On arrays only canonical decimal indices (`"0"`, `"12"`, not `"01"`) resolve;
/// `"length"` is not a key of a list.
pub fn get_key<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(key),
        Value::Array(items) => {
            let canonical = key == "0" || (!key.starts_with('0') && !key.is_empty());
            if !canonical || !key.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            key.parse::<usize>().ok().and_then(|idx| items.get(idx))
        }
        _ => None,
    }
}

/// Iterate the `(key, value)` entries of a mapping-compatible value.
///
/// Array entries are keyed by their index. Scalars have no entries.
pub fn entries(value: &Value) -> Vec<(String, &Value)> {
    match value {
        Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), v)).collect(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), v))
            .collect(),
        _ => Vec::new(),
    }
}

/// Human readable name of a value's type, used in diagnostics.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
    }
}

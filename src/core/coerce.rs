//! Type coercion.
//!
//! Numbers use loose leading-prefix parsing: the longest numeric prefix of
//! the value is parsed and the rest is ignored, so `"42abc"` is `42`. A value
//! with no numeric prefix fails.

use std::fmt;

use tracing::trace;

use crate::core::manifest::TypeTag;
use crate::core::resolve::ResolvedVariable;
use crate::error::{CoercionError, Result};

/// A value converted to its declared type.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Integer(n) => write!(f, "{}", n),
            Self::Float(x) if x.is_infinite() && *x > 0.0 => f.write_str("Infinity"),
            Self::Float(x) if x.is_infinite() => f.write_str("-Infinity"),
            Self::Float(x) => write!(f, "{}", x),
            Self::Boolean(b) => write!(f, "{}", b),
        }
    }
}

/// A variable after coercion.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedVariable {
    pub local_key: String,
    /// `None` when absent from the environment.
    pub value: Option<TypedValue>,
    pub from_secret: bool,
}

/// Coerce every variable to its declared type.
///
/// Absent values stay absent.
///
/// # Errors
///
/// Returns `CoercionError` for the first value that cannot be converted. The
/// value is redacted when it came from the secret store.
pub fn coerce(variables: Vec<ResolvedVariable>) -> Result<Vec<TypedVariable>> {
    variables.into_iter().map(coerce_one).collect()
}

fn coerce_one(var: ResolvedVariable) -> Result<TypedVariable> {
    let value = match var.value {
        None => None,
        Some(raw) => match coerce_value(&raw, var.declared) {
            Some(typed) => Some(typed),
            None => {
                return Err(CoercionError {
                    key: var.local_key,
                    declared: var.declared,
                    value: if var.from_secret { None } else { Some(raw) },
                }
                .into())
            }
        },
    };

    trace!(key = %var.local_key, declared = %var.declared, "coerced");
    Ok(TypedVariable {
        local_key: var.local_key,
        value,
        from_secret: var.from_secret,
    })
}

/// Convert `raw` to `declared`, or `None` if it does not parse.
pub fn coerce_value(raw: &str, declared: TypeTag) -> Option<TypedValue> {
    match declared {
        TypeTag::String => Some(TypedValue::String(raw.to_string())),
        TypeTag::Integer => parse_int_prefix(raw).map(TypedValue::Integer),
        TypeTag::Float => parse_float_prefix(raw).map(TypedValue::Float),
        TypeTag::Boolean => parse_bool(raw).map(TypedValue::Boolean),
    }
}

/// Parse the leading base-10 integer of `raw`.
///
/// Leading whitespace is skipped and one sign is accepted.
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }

    // i64 accepts a leading '+' as well as '-'
    s[..end].parse().ok()
}

/// Parse the leading decimal number of `raw`.
///
/// Accepts `[sign] digits [. digits] [e [sign] digits]`, a fraction without
/// an integer part (`.5`), and `Infinity`.
pub fn parse_float_prefix(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let negative = bytes.first() == Some(&b'-');

    if s[end..].starts_with("Infinity") {
        return Some(if negative { f64::NEG_INFINITY } else { f64::INFINITY });
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }

    if mantissa_digits == 0 {
        return None;
    }

    // Exponent only counts when it has digits: "1e" parses as 1.
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}

/// Parse a boolean flag: `true/false/1/0/yes/no/on/off`, any case.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

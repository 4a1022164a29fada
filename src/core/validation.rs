//! Input validation for variable names and values.
//!
//! The process environment rejects some names and values outright
//! (`std::env::set_var` panics on them), so they are caught here first.

use crate::error::{Error, Result};

/// Validate a variable name.
///
/// Names must be usable as environment variable keys:
/// - Cannot be empty
/// - Cannot contain `=`
/// - Cannot contain a NUL byte
///
/// Returns the reason on failure.
pub fn validate_key(key: &str) -> std::result::Result<(), String> {
    if key.is_empty() {
        return Err("name cannot be empty".to_string());
    }

    for (i, ch) in key.chars().enumerate() {
        if ch == '=' || ch == '\0' {
            return Err(format!(
                "invalid character {:?} at position {}",
                ch,
                i + 1
            ));
        }
    }

    Ok(())
}

/// Validate a value before it is published.
///
/// # Errors
///
/// Returns `Error::InvalidValue` if the value contains a NUL byte. The value
/// itself is never part of the error.
pub fn validate_value(key: &str, value: &str) -> Result<()> {
    if value.contains('\0') {
        return Err(Error::InvalidValue {
            key: key.to_string(),
        });
    }

    Ok(())
}

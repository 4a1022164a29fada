//! Publication of coerced values into an environment store.

use tracing::{debug, warn};

use crate::core::coerce::TypedVariable;
use crate::core::env::EnvironmentStore;
use crate::core::validation;
use crate::error::Result;

/// Write every present value into `env`, in manifest order.
///
/// All values are validated before the first write, so a rejected value
/// leaves `env` untouched. Absent values are not written.
///
/// Returns the keys that were written.
///
/// # Errors
///
/// Returns `Error::InvalidValue` if a value cannot be stored in the
/// environment.
pub fn publish(env: &mut dyn EnvironmentStore, variables: &[TypedVariable]) -> Result<Vec<String>> {
    let rendered: Vec<(&str, Option<String>, bool)> = variables
        .iter()
        .map(|v| {
            (
                v.local_key.as_str(),
                v.value.as_ref().map(ToString::to_string),
                v.from_secret,
            )
        })
        .collect();

    for (key, value, _) in &rendered {
        if let Some(value) = value {
            validation::validate_value(key, value)?;
        }
    }

    let mut published = Vec::with_capacity(rendered.len());
    for (key, value, from_secret) in rendered {
        let Some(value) = value else {
            warn!(key, "not publishing absent variable");
            continue;
        };

        env.set(key, &value);
        if from_secret {
            debug!(key, "loaded variable from secret store");
        } else {
            debug!(key, value = %value, "loaded variable");
        }
        published.push(key.to_string());
    }

    Ok(published)
}

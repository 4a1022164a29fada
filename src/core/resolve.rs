//! Secret resolution.
//!
//! Replaces placeholder values with the real secret from the store. Fetches
//! run one at a time in manifest order and the first failure aborts the
//! whole pass.

use tracing::{debug, error};

use crate::core::manifest::TypeTag;
use crate::core::presence::ApplicationVariable;
use crate::core::store::{FetchFailure, SecretStore};
use crate::error::{Result, SecretStoreError};

/// A variable after secret resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVariable {
    pub local_key: String,
    pub declared: TypeTag,
    /// Final string value, `None` when absent from the environment.
    pub value: Option<String>,
    /// True when `value` came from the secret store.
    pub from_secret: bool,
}

impl From<ApplicationVariable> for ResolvedVariable {
    fn from(var: ApplicationVariable) -> Self {
        Self {
            local_key: var.local_key,
            declared: var.declared,
            value: var.raw_value,
            from_secret: false,
        }
    }
}

/// Resolve every secret reference in `variables` against `store`.
///
/// Variables that are not secret references pass through untouched and
/// never reach the store.
///
/// # Errors
///
/// Returns `SecretStoreError::Auth` when the store reports an authentication
/// failure and `SecretStoreError::Fetch` for any other failure.
pub async fn resolve(
    store: &dyn SecretStore,
    variables: Vec<ApplicationVariable>,
) -> Result<Vec<ResolvedVariable>> {
    let mut resolved = Vec::with_capacity(variables.len());

    for var in variables {
        if !var.is_secret_reference {
            resolved.push(ResolvedVariable::from(var));
            continue;
        }

        debug!(key = %var.local_key, secret = %var.external_key, store = store.name(), "resolving secret");

        let value = match store.fetch(&var.external_key).await {
            Ok(value) => value,
            Err(failure) => {
                error!(key = %var.local_key, secret = %var.external_key, "secret fetch failed");
                return Err(classify(store.name(), var, failure).into());
            }
        };

        resolved.push(ResolvedVariable {
            local_key: var.local_key,
            declared: var.declared,
            value: Some(value),
            from_secret: true,
        });
    }

    Ok(resolved)
}

fn classify(store: &str, var: ApplicationVariable, failure: FetchFailure) -> SecretStoreError {
    match failure {
        FetchFailure::Auth(message) => SecretStoreError::Auth {
            key: var.local_key,
            external_key: var.external_key,
            store: store.to_string(),
            message,
        },
        other => SecretStoreError::Fetch {
            key: var.local_key,
            external_key: var.external_key,
            store: store.to_string(),
            message: other.to_string(),
        },
    }
}

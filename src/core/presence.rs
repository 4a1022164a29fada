//! Presence validation.
//!
//! Cross-references the manifest against an environment snapshot. Missing
//! variables are reported in the result, never raised; the loader decides
//! whether they are fatal.

use std::collections::BTreeMap;

use tracing::{trace, warn};

use crate::core::manifest::{Manifest, TypeTag};

/// Working record for one manifest variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationVariable {
    /// Name in the environment and the manifest.
    pub local_key: String,
    /// Name used when fetching from the secret store.
    pub external_key: String,
    /// Value found in the snapshot, `None` when absent.
    pub raw_value: Option<String>,
    /// True when the raw value is the secret placeholder.
    pub is_secret_reference: bool,
    pub declared: TypeTag,
}

/// Outcome of presence validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionResult {
    /// One variable per manifest entry, in manifest order.
    pub variables: Vec<ApplicationVariable>,
    /// Keys absent from the snapshot, in manifest order.
    pub missing: Vec<String>,
}

impl ResolutionResult {
    pub fn has_missing(&self) -> bool {
        !self.missing.is_empty()
    }

    /// Number of variables that reference the secret store.
    pub fn secret_count(&self) -> usize {
        self.variables
            .iter()
            .filter(|v| v.is_secret_reference)
            .count()
    }
}

/// Secret store name for a local key.
///
/// Only the first `_` becomes `-`: `DB_PASSWORD` -> `DB-PASSWORD`,
/// `A_B_C` -> `A-B_C`.
pub fn external_key(local_key: &str) -> String {
    local_key.replacen('_', "-", 1)
}

/// Validate every manifest entry against `snapshot`.
pub fn validate(
    manifest: &Manifest,
    snapshot: &BTreeMap<String, String>,
    placeholder: &str,
) -> ResolutionResult {
    let mut variables = Vec::with_capacity(manifest.len());
    let mut missing = Vec::new();

    for entry in manifest.entries() {
        let raw_value = snapshot.get(&entry.name).cloned();

        if raw_value.is_none() {
            warn!(key = %entry.name, "missing required env var");
            missing.push(entry.name.clone());
        }

        let is_secret_reference = raw_value.as_deref() == Some(placeholder);
        trace!(
            key = %entry.name,
            declared = %entry.declared,
            present = raw_value.is_some(),
            secret = is_secret_reference,
            "validated"
        );

        variables.push(ApplicationVariable {
            external_key: external_key(&entry.name),
            local_key: entry.name.clone(),
            raw_value,
            is_secret_reference,
            declared: entry.declared,
        });
    }

    ResolutionResult { variables, missing }
}

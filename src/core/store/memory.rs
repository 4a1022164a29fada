//! In-memory secret store.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{FetchFailure, SecretStore};

/// Secret store backed by a map.
///
/// Records every name it was asked for, in order. Failures can be injected
/// per name with [`MemoryStore::with_failure`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    secrets: HashMap<String, String>,
    failures: HashMap<String, FetchFailure>,
    calls: Mutex<Vec<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from name/value pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            secrets: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            ..Self::default()
        }
    }

    pub fn with_secret(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.secrets.insert(name.into(), value.into());
        self
    }

    /// Make fetches of `name` fail with `failure`.
    pub fn with_failure(mut self, name: impl Into<String>, failure: FetchFailure) -> Self {
        self.failures.insert(name.into(), failure);
        self
    }

    /// Names fetched so far.
    pub fn calls(&self) -> Vec<String> {
        match self.calls.lock() {
            Ok(calls) => calls.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait]
impl SecretStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn fetch(&self, name: &str) -> Result<String, FetchFailure> {
        match self.calls.lock() {
            Ok(mut calls) => calls.push(name.to_string()),
            Err(poisoned) => poisoned.into_inner().push(name.to_string()),
        }

        if let Some(failure) = self.failures.get(name) {
            return Err(failure.clone());
        }

        self.secrets.get(name).cloned().ok_or(FetchFailure::NotFound)
    }
}

//! File-backed secret store.
//!
//! Reads a JSON object of `name -> value` once at startup. Intended for
//! local development where no real secret store is reachable:
//!
//! ```json
//! { "DB-PASSWORD": "local-password" }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, trace};
use zeroize::Zeroize;

use super::{FetchFailure, SecretStore};
use crate::error::{Result, SecretStoreError};

/// Secret store backed by a JSON file.
pub struct FileStore {
    path: PathBuf,
    secrets: HashMap<String, String>,
}

impl FileStore {
    /// Load secrets from `path`.
    ///
    /// # Errors
    ///
    /// Returns `SecretStoreError::Unavailable` if the file cannot be read or
    /// is not a JSON object of strings.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading secrets file");

        let unavailable = |message: String| SecretStoreError::Unavailable {
            store: "file".to_string(),
            message,
        };

        let mut contents = std::fs::read_to_string(path)
            .map_err(|e| unavailable(format!("failed to read '{}': {}", path.display(), e)))?;
        let parsed: std::result::Result<HashMap<String, String>, _> =
            serde_json::from_str(&contents);
        contents.zeroize();

        // Only the position is reported; the error text may quote a value.
        let secrets = parsed.map_err(|e| {
            unavailable(format!(
                "'{}' is not a JSON object of strings (line {}, column {})",
                path.display(),
                e.line(),
                e.column()
            ))
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            secrets,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for FileStore {
    fn drop(&mut self) {
        for value in self.secrets.values_mut() {
            value.zeroize();
        }
    }
}

#[async_trait]
impl SecretStore for FileStore {
    fn name(&self) -> &str {
        "file"
    }

    async fn fetch(&self, name: &str) -> std::result::Result<String, FetchFailure> {
        trace!(secret = %name, "fetching from secrets file");
        self.secrets.get(name).cloned().ok_or(FetchFailure::NotFound)
    }
}

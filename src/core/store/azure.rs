//! Azure Key Vault secret store.
//!
//! Fetches secrets through the Azure CLI. Enable with `--features azure`
//! (on by default).
//!
//! ## Requirements
//!
//! - `az` CLI must be installed and logged in (`az login`, a managed identity,
//!   or service principal environment variables)
//! - The identity needs the `get` secret permission on the vault
//!
//! ## Usage
//!
//! ```bash
//! AZURE_KEY_VAULT=kv-shared-dev envload run -- node server.js
//! ```
//!
//! Key Vault secret names only allow `-`, which is why `DB_PASSWORD` is
//! looked up as `DB-PASSWORD`.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, trace};

use super::{FetchFailure, SecretStore};
use crate::error::{Result, SecretStoreError};

/// Markers in `az` stderr that mean the caller is not authenticated.
const AUTH_MARKERS: &[&str] = &[
    "az login",
    "AADSTS",
    "DefaultAzureCredential",
    "AuthenticationError",
    "CredentialUnavailableError",
    "Unauthorized",
    "Forbidden",
];

/// Markers in `az` stderr that mean the secret does not exist.
const NOT_FOUND_MARKERS: &[&str] = &["SecretNotFound", "was not found in this key vault"];

/// Azure Key Vault backend using the az CLI
pub struct AzureKeyVault {
    vault: String,
    az: PathBuf,
}

impl AzureKeyVault {
    /// Create a backend for the vault named `vault`.
    ///
    /// # Errors
    ///
    /// Returns `SecretStoreError::Unavailable` if the `az` CLI is not on `PATH`.
    pub fn new(vault: &str) -> Result<Self> {
        let az = which::which("az").map_err(|_| SecretStoreError::Unavailable {
            store: "azure".to_string(),
            message: "az CLI not found. Install it from https://learn.microsoft.com/cli/azure/install-azure-cli".to_string(),
        })?;

        debug!(vault = %vault, az = %az.display(), "using azure key vault");
        Ok(Self {
            vault: vault.to_string(),
            az,
        })
    }
}

/// Classify a failed `az` invocation from its stderr.
fn classify(stderr: &str) -> FetchFailure {
    let message = stderr.trim().lines().last().unwrap_or("az failed").to_string();

    if AUTH_MARKERS.iter().any(|m| stderr.contains(m)) {
        FetchFailure::Auth(message)
    } else if NOT_FOUND_MARKERS.iter().any(|m| stderr.contains(m)) {
        FetchFailure::NotFound
    } else {
        FetchFailure::Other(message)
    }
}

#[async_trait]
impl SecretStore for AzureKeyVault {
    fn name(&self) -> &str {
        "azure"
    }

    async fn fetch(&self, name: &str) -> std::result::Result<String, FetchFailure> {
        trace!(vault = %self.vault, secret = %name, "fetching from azure key vault");

        let output = Command::new(&self.az)
            .args([
                "keyvault",
                "secret",
                "show",
                "--vault-name",
                self.vault.as_str(),
                "--name",
                name,
                "--query",
                "value",
                "--output",
                "tsv",
            ])
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| FetchFailure::Other(format!("failed to run az: {}", e)))?;

        if !output.status.success() {
            return Err(classify(&String::from_utf8_lossy(&output.stderr)));
        }

        let mut value = String::from_utf8(output.stdout)
            .map_err(|_| FetchFailure::Other("secret value is not UTF-8".to_string()))?;

        // tsv output ends with a newline that is not part of the secret
        if value.ends_with('\n') {
            value.pop();
            if value.ends_with('\r') {
                value.pop();
            }
        }

        Ok(value)
    }
}

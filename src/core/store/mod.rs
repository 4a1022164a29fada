//! Secret store backends.
//!
//! The resolver only needs one capability from a store: fetch a secret value
//! by name. Backends report failures with a [`FetchFailure`] classification
//! so authentication problems can be told apart from missing secrets.
//!
//! ## Backends
//!
//! - **azure**: Azure Key Vault through the `az` CLI. Feature-gated (`azure`, on by default).
//! - **file**: JSON object of `name -> value` on disk, for local development.
//! - **memory**: in-process map, for embedding and tests.
//!
//! ## Adding a New Backend
//!
//! 1. Implement the `SecretStore` trait
//! 2. Add the implementation in a new file (e.g., `vault.rs`)
//! 3. Feature-gate if appropriate
//! 4. Register its name in [`open`]

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::core::config::Options;
use crate::error::{Result, SecretStoreError};

#[cfg(feature = "azure")]
pub mod azure;
mod file;
mod memory;

#[cfg(feature = "azure")]
pub use azure::AzureKeyVault;
pub use file::FileStore;
pub use memory::MemoryStore;

/// Classified failure reported by a backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    /// Credentials are missing, expired or rejected.
    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("secret not found")]
    NotFound,

    #[error("{0}")]
    Other(String),
}

impl FetchFailure {
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }
}

/// Secret store trait.
///
/// Implementations must never log the values they return.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Backend name for display and error messages.
    fn name(&self) -> &str;

    /// Fetch the current value of the secret called `name`.
    async fn fetch(&self, name: &str) -> std::result::Result<String, FetchFailure>;
}

/// Open the backend selected by `options.secret_store`.
///
/// Names are matched case-insensitively.
///
/// # Errors
///
/// Returns `SecretStoreError::Unsupported` for unknown names or backends
/// that were not compiled in, and `SecretStoreError::Unavailable` when the
/// backend cannot start (missing vault name, missing CLI, unreadable file).
pub fn open(options: &Options) -> Result<Box<dyn SecretStore>> {
    let name = options.secret_store.to_ascii_lowercase();
    debug!(store = %name, "opening secret store");

    match name.as_str() {
        "azure" => open_azure(options),
        "file" => {
            let path = options.vault.as_deref().ok_or_else(|| SecretStoreError::Unavailable {
                store: "file".to_string(),
                message: "no secrets file given (pass --vault <path>)".to_string(),
            })?;
            Ok(Box::new(FileStore::load(path)?))
        }
        "memory" => Ok(Box::new(MemoryStore::new())),
        other => Err(SecretStoreError::Unsupported(other.to_string()).into()),
    }
}

#[cfg(feature = "azure")]
fn open_azure(options: &Options) -> Result<Box<dyn SecretStore>> {
    let vault = options
        .vault
        .as_deref()
        .ok_or_else(|| SecretStoreError::Unavailable {
            store: "azure".to_string(),
            message: "no vault name given (set AZURE_KEY_VAULT or --vault)".to_string(),
        })?;
    Ok(Box::new(AzureKeyVault::new(vault)?))
}

#[cfg(not(feature = "azure"))]
fn open_azure(_options: &Options) -> Result<Box<dyn SecretStore>> {
    Err(SecretStoreError::Unsupported(
        "azure support not compiled. Rebuild with: cargo install envload --features azure"
            .to_string(),
    )
    .into())
}

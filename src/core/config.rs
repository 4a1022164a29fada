//! Loader options.
//!
//! Options come from built-in defaults, an optional `envload.toml`, and CLI
//! flags, in increasing order of precedence. Only the first two live here.
//!
//! ```toml
//! env_manifest = "config/required-env.json"
//! secret_store = "azure"
//! vault = "kv-shared-dev-southeast"
//! exit_on_missing = true
//! secret_placeholder = "FROM_SECRET"
//! fail_mode = "raise"
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::constants;
use crate::error::{ConfigError, Result};

/// What the loader does with a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailMode {
    /// Return the error to the caller.
    #[default]
    Raise,
    /// Log the classified error and exit the process with status 1.
    Exit,
}

/// Options recognized by the loader.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// Path of the env manifest.
    pub env_manifest: PathBuf,
    /// Secret store backend name (see [`crate::core::store::open`]).
    pub secret_store: String,
    /// Backend locator: Azure vault name, or secrets file path for `file`.
    pub vault: Option<String>,
    /// Treat missing variables as fatal.
    pub exit_on_missing: bool,
    /// Value that marks a variable as secret-backed.
    pub secret_placeholder: String,
    pub fail_mode: FailMode,
    /// Merge a dotenv file into the snapshot before validation.
    pub load_dotenv: bool,
    /// Dotenv file path. Skipped silently when it does not exist.
    pub dotenv: PathBuf,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            env_manifest: PathBuf::from(constants::MANIFEST_FILE),
            secret_store: constants::DEFAULT_STORE.to_string(),
            vault: None,
            exit_on_missing: true,
            secret_placeholder: constants::DEFAULT_PLACEHOLDER.to_string(),
            fail_mode: FailMode::Raise,
            load_dotenv: true,
            dotenv: PathBuf::from(constants::ENV_FILE),
        }
    }
}

impl Options {
    /// Load options from a TOML file. Unset fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile` if the file cannot be read, or
    /// `ConfigError::Parse` if the TOML is malformed or has unknown keys.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading options");

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let options: Self = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(
            manifest = %options.env_manifest.display(),
            store = %options.secret_store,
            "options loaded"
        );
        Ok(options)
    }

    /// Load `envload.toml` from `dir` if present, otherwise defaults.
    pub fn discover(dir: impl AsRef<Path>) -> Result<Self> {
        let path = dir.as_ref().join(constants::CONFIG_FILE);
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}

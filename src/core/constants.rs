//! Constants used throughout envload.
//!
//! Centralizes magic strings and configuration values.

/// Default env manifest file name.
pub const MANIFEST_FILE: &str = "required-env.json";

/// Optional options file name (envload.toml).
pub const CONFIG_FILE: &str = "envload.toml";

/// Environment variables file name (.env).
pub const ENV_FILE: &str = ".env";

/// Sentinel value that marks a variable as secret-backed.
pub const DEFAULT_PLACEHOLDER: &str = "FROM_SECRET";

/// Default secret store backend.
pub const DEFAULT_STORE: &str = "azure";

/// Log filter environment variable.
pub const LOG_ENV: &str = "ENVLOAD_LOG";

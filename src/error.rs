//! Error types for envload.
//!
//! Every pipeline stage has its own error enum; all of them convert into
//! [`Error`] so callers can use `?` across stage boundaries.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::manifest::TypeTag;

/// Top-level error returned by every fallible envload operation.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("missing required environment variables: {}", .0.join(", "))]
    MissingVariables(Vec<String>),

    #[error(transparent)]
    SecretStore(#[from] SecretStoreError),

    #[error(transparent)]
    Coercion(#[from] CoercionError),

    #[error("value of '{key}' contains a NUL byte and cannot be published")]
    InvalidValue { key: String },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Manifest reading and parsing errors.
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("unable to find required env manifest file '{}'", .path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read env manifest '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("env manifest '{}' is not valid JSON: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("env manifest '{}' must be a JSON object", .path.display())]
    NotAnObject { path: PathBuf },

    #[error("env manifest '{}' declares '{key}' more than once", .path.display())]
    DuplicateKey { path: PathBuf, key: String },

    #[error("env manifest '{}' has invalid variable name '{key}': {reason}", .path.display())]
    InvalidKey {
        path: PathBuf,
        key: String,
        reason: String,
    },

    #[error("env manifest '{}' declares '{key}' with unsupported placeholder type {found}", .path.display())]
    UnsupportedType {
        path: PathBuf,
        key: String,
        found: &'static str,
    },
}

/// Secret store errors.
#[derive(Error, Debug)]
pub enum SecretStoreError {
    #[error("authentication to {store} secret store failed while fetching '{external_key}' for '{key}': {message}")]
    Auth {
        key: String,
        external_key: String,
        store: String,
        message: String,
    },

    #[error("failed to fetch secret '{external_key}' for '{key}' from {store}: {message}")]
    Fetch {
        key: String,
        external_key: String,
        store: String,
        message: String,
    },

    #[error("unsupported secret store: {0}")]
    Unsupported(String),

    #[error("{store} secret store unavailable: {message}")]
    Unavailable { store: String, message: String },
}

/// A value could not be converted to its declared type.
///
/// `value` is `None` when the offending value came from the secret store;
/// it is then rendered as `<redacted>`.
#[derive(Error, Debug)]
#[error("'{key}' must be {declared}, got {}", display_value(.value))]
pub struct CoercionError {
    pub key: String,
    pub declared: TypeTag,
    pub value: Option<String>,
}

fn display_value(value: &Option<String>) -> String {
    match value {
        Some(v) => format!("'{}'", v),
        None => "<redacted>".to_string(),
    }
}

/// Options file errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config '{}': {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Classification of an [`Error`], used for reporting in exit mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ManifestNotFound,
    ManifestParse,
    Manifest,
    MissingVariables,
    SecretStoreAuth,
    SecretStore,
    Coercion,
    Config,
    Io,
}

impl ErrorKind {
    /// Short human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::ManifestNotFound => "manifest not found",
            Self::ManifestParse => "manifest parse error",
            Self::Manifest => "invalid manifest",
            Self::MissingVariables => "missing variables",
            Self::SecretStoreAuth => "secret store authentication failed",
            Self::SecretStore => "secret store error",
            Self::Coercion => "type coercion failed",
            Self::Config => "configuration error",
            Self::Io => "io error",
        }
    }
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Manifest(ManifestError::NotFound { .. }) => ErrorKind::ManifestNotFound,
            Self::Manifest(ManifestError::Parse { .. }) => ErrorKind::ManifestParse,
            Self::Manifest(_) => ErrorKind::Manifest,
            Self::MissingVariables(_) => ErrorKind::MissingVariables,
            Self::SecretStore(SecretStoreError::Auth { .. }) => ErrorKind::SecretStoreAuth,
            Self::SecretStore(_) => ErrorKind::SecretStore,
            Self::Coercion(_) | Self::InvalidValue { .. } => ErrorKind::Coercion,
            Self::Config(_) => ErrorKind::Config,
            Self::Io(_) => ErrorKind::Io,
        }
    }

    /// Operator hint for fixing the error, if there is an obvious one.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Manifest(ManifestError::NotFound { .. }) => {
                Some("pass --manifest or create required-env.json")
            }
            Self::MissingVariables(_) => {
                Some("set the variables, or pass --allow-missing to continue without them")
            }
            Self::SecretStore(SecretStoreError::Auth { .. }) => Some("run: az login"),
            Self::SecretStore(SecretStoreError::Unsupported(_)) => {
                Some("supported stores: azure, file, memory")
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

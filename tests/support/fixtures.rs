//! Test fixtures and constants.

/// Default manifest file name.
pub const MANIFEST_FILE: &str = "required-env.json";

/// Secrets file used with `--store file`.
pub const SECRETS_FILE: &str = "secrets.json";

/// Manifest covering every declared type.
pub const FULL_MANIFEST: &str = r#"{
    "DB_HOST": "",
    "DB_PORT": 0,
    "DB_PASSWORD": "",
    "RATIO": 0.0,
    "DEBUG": false
}"#;

/// Environment satisfying `FULL_MANIFEST`, with the password secret-backed.
pub const FULL_ENV: &[(&str, &str)] = &[
    ("DB_HOST", "localhost"),
    ("DB_PORT", "5432"),
    ("DB_PASSWORD", "FROM_SECRET"),
    ("RATIO", "0.75"),
    ("DEBUG", "yes"),
];

/// Secrets file content matching `FULL_ENV`.
pub const SECRETS: &str = r#"{"DB-PASSWORD": "s3cr3t"}"#;

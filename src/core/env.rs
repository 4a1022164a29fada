//! Environment stores and dotenv files.
//!
//! The pipeline reads the environment once as a snapshot and writes the
//! published values back at the end. [`EnvironmentStore`] is the seam between
//! the pipeline and wherever those variables actually live.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;

/// Readable and writable set of environment variables.
pub trait EnvironmentStore {
    /// All current key/value pairs.
    fn snapshot(&self) -> BTreeMap<String, String>;

    /// Set a single variable.
    fn set(&mut self, key: &str, value: &str);
}

/// The real process environment.
///
/// Writes are process-global and last for the rest of the process lifetime.
/// Callers must not run two loaders against it concurrently.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvironmentStore for ProcessEnv {
    fn snapshot(&self) -> BTreeMap<String, String> {
        // Non-unicode variables cannot be named in a manifest, so skip them.
        std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect()
    }

    fn set(&mut self, key: &str, value: &str) {
        std::env::set_var(key, value);
    }
}

/// In-memory environment, for embedding and tests.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemoryEnv {
    vars: BTreeMap<String, String>,
}

impl MemoryEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from key/value pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn vars(&self) -> &BTreeMap<String, String> {
        &self.vars
    }
}

impl EnvironmentStore for MemoryEnv {
    fn snapshot(&self) -> BTreeMap<String, String> {
        self.vars.clone()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.vars.insert(key.to_string(), value.to_string());
    }
}

/// A parsed .env file
#[derive(Debug, Clone)]
pub struct DotEnv {
    entries: Vec<(String, String)>,
    path: PathBuf,
}

impl DotEnv {
    /// Parse a .env file from disk
    ///
    /// Skips empty lines and comments (lines starting with #).
    /// Supports values with or without quotes, and an optional `export` prefix.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let entries = parse(&contents);

        debug!(path = %path.display(), entries = entries.len(), "dotenv loaded");
        Ok(Self {
            entries,
            path: path.to_path_buf(),
        })
    }

    /// Create from raw key-value pairs
    pub fn from_pairs(pairs: Vec<(String, String)>, path: PathBuf) -> Self {
        Self {
            entries: pairs,
            path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Fill `snapshot` with entries whose keys are not already set.
    ///
    /// Returns the number of keys added.
    pub fn merge_into(&self, snapshot: &mut BTreeMap<String, String>) -> usize {
        // Later lines of the file may override earlier ones, never a real variable.
        let mut from_file = HashSet::new();
        for (key, value) in &self.entries {
            if !snapshot.contains_key(key) || from_file.contains(key) {
                from_file.insert(key.clone());
                snapshot.insert(key.clone(), value.clone());
            }
        }
        from_file.len()
    }

    /// Serialize to .env format string
    ///
    /// Quotes values that contain spaces or special characters.
    pub fn to_env_string(&self) -> String {
        let mut output = String::new();

        for (key, value) in &self.entries {
            if needs_quotes(value) {
                output.push_str(&format!("{}=\"{}\"\n", key, escape_env_value(value)));
            } else {
                output.push_str(&format!("{}={}\n", key, value));
            }
        }

        output
    }
}

/// Parse .env text into ordered key/value pairs.
pub fn parse(contents: &str) -> Vec<(String, String)> {
    let mut entries = Vec::new();

    for line in contents.lines() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line = line.strip_prefix("export ").unwrap_or(line);

        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            entries.push((key.to_string(), parse_env_value(value.trim())));
        }
    }

    entries
}

fn parse_env_value(raw: &str) -> String {
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        return unescape_double_quoted(&raw[1..raw.len() - 1]);
    }

    if raw.len() >= 2 && raw.starts_with('\'') && raw.ends_with('\'') {
        return raw[1..raw.len() - 1].to_string();
    }

    raw.to_string()
}

fn unescape_double_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }

        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}

fn needs_quotes(value: &str) -> bool {
    value.is_empty()
        || value.chars().any(|ch| ch.is_whitespace())
        || value.contains('#')
        || value.contains('=')
        || value.contains('"')
        || value.contains('\'')
        || value.contains('\\')
}

fn escape_env_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            _ => escaped.push(ch),
        }
    }

    escaped
}

//! Env manifest reading.
//!
//! A manifest is a JSON object mapping each required variable name to a
//! placeholder value. The JSON type of the placeholder decides the declared
//! type of the variable:
//!
//! ```json
//! { "DB_PORT": 0, "DB_NAME": "", "RATIO": 0.0, "DEBUG": false }
//! ```

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde_json::Value;
use tracing::debug;

use crate::core::validation;
use crate::error::{ManifestError, Result};

/// Declared type of a manifest variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    String,
    Integer,
    Float,
    Boolean,
}

impl TypeTag {
    /// Decide the declared type from a JSON placeholder value.
    ///
    /// Returns the JSON type name on failure.
    fn from_placeholder(value: &Value) -> std::result::Result<Self, &'static str> {
        match value {
            Value::String(_) => Ok(Self::String),
            Value::Bool(_) => Ok(Self::Boolean),
            Value::Number(n) if n.is_f64() && n.as_f64().is_some_and(out_of_range_integer) => {
                Err("out-of-range integer")
            }
            Value::Number(n) if n.is_f64() => Ok(Self::Float),
            Value::Number(_) => Ok(Self::Integer),
            Value::Null => Err("null"),
            Value::Array(_) => Err("array"),
            Value::Object(_) => Err("object"),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
        }
    }
}

/// serde_json reads integer literals beyond the 64-bit range as floats, so a
/// whole number outside that range cannot be told apart from a float literal.
fn out_of_range_integer(x: f64) -> bool {
    const U64_END: f64 = 18_446_744_073_709_551_616.0;
    const I64_START: f64 = -9_223_372_036_854_775_808.0;
    x.is_finite() && x.fract() == 0.0 && (x >= U64_END || x < I64_START)
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One required variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub name: String,
    pub declared: TypeTag,
}

/// Parsed manifest, in document order.
#[derive(Debug, Clone)]
pub struct Manifest {
    path: PathBuf,
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Read and parse a manifest file.
    ///
    /// # Errors
    ///
    /// Returns `ManifestError::NotFound` if the file does not exist, or any
    /// of the parse errors documented on [`Manifest::parse`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading env manifest");

        let contents = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ManifestError::NotFound {
                path: path.to_path_buf(),
            },
            _ => ManifestError::Read {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        Self::parse(path, &contents)
    }

    /// Parse manifest text. `path` is only used for error messages.
    ///
    /// # Errors
    ///
    /// - `ManifestError::Parse` if the text is not valid JSON
    /// - `ManifestError::NotAnObject` if the top-level value is not an object
    /// - `ManifestError::DuplicateKey` if a key appears twice
    /// - `ManifestError::InvalidKey` if a key cannot name an env variable
    /// - `ManifestError::UnsupportedType` for null, array or object placeholders
    pub fn parse(path: impl AsRef<Path>, text: &str) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let raw: RawEntries = serde_json::from_str(text).map_err(|e| {
            if e.classify() == serde_json::error::Category::Data {
                ManifestError::NotAnObject { path: path.clone() }
            } else {
                ManifestError::Parse {
                    path: path.clone(),
                    source: e,
                }
            }
        })?;

        let mut seen = HashSet::with_capacity(raw.0.len());
        let mut entries = Vec::with_capacity(raw.0.len());

        for (name, placeholder) in raw.0 {
            if let Err(reason) = validation::validate_key(&name) {
                return Err(ManifestError::InvalidKey {
                    path,
                    key: name,
                    reason,
                }
                .into());
            }
            if !seen.insert(name.clone()) {
                return Err(ManifestError::DuplicateKey { path, key: name }.into());
            }
            let declared = match TypeTag::from_placeholder(&placeholder) {
                Ok(tag) => tag,
                Err(found) => {
                    return Err(ManifestError::UnsupportedType {
                        path,
                        key: name,
                        found,
                    }
                    .into())
                }
            };
            entries.push(ManifestEntry { name, declared });
        }

        debug!(path = %path.display(), entries = entries.len(), "env manifest loaded");
        Ok(Self { path, entries })
    }

    /// Build a manifest directly from entries.
    pub fn from_entries(path: impl Into<PathBuf>, entries: Vec<ManifestEntry>) -> Self {
        Self {
            path: path.into(),
            entries,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Object members in document order, duplicates kept.
struct RawEntries(Vec<(String, Value)>);

impl<'de> Deserialize<'de> for RawEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = RawEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object of variable names")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<RawEntries, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, Value>()? {
                    entries.push((key, value));
                }
                Ok(RawEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

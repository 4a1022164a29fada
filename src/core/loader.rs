//! The configure pipeline.
//!
//! ```text
//! read manifest -> validate presence -> [missing and exit_on_missing: fail]
//!     -> resolve secrets -> coerce types -> publish
//! ```
//!
//! The environment is read once as a snapshot before validation and written
//! once at the end. Any failure stops the pipeline before publication, so a
//! failed pass never leaves half of the manifest published.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::core::coerce;
use crate::core::config::{FailMode, Options};
use crate::core::env::{DotEnv, EnvironmentStore};
use crate::core::manifest::Manifest;
use crate::core::presence::{self, ResolutionResult};
use crate::core::publish;
use crate::core::resolve;
use crate::core::store::{self, SecretStore};
use crate::error::{Error, Result};

/// Outcome of a successful pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// Keys written to the environment, in manifest order.
    pub published: Vec<String>,
    /// Keys whose values came from the secret store.
    pub secrets: Vec<String>,
    /// Keys absent from the environment. Only non-empty when
    /// `exit_on_missing` is off.
    pub missing: Vec<String>,
}

/// Loads a manifest's variables into an environment store.
pub struct Loader {
    options: Options,
    store: Option<Arc<dyn SecretStore>>,
}

impl Loader {
    /// Create a loader. The secret store named in `options` is opened on
    /// first use, and only if some variable references it.
    pub fn new(options: Options) -> Self {
        Self {
            options,
            store: None,
        }
    }

    /// Use `store` instead of opening the one named in the options.
    pub fn with_store(mut self, store: Arc<dyn SecretStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Run the full pipeline against `env`.
    ///
    /// In [`FailMode::Exit`] a failure is logged with its classification and
    /// the process exits with status 1 instead of returning.
    ///
    /// # Errors
    ///
    /// In [`FailMode::Raise`], returns the first failure of any stage.
    pub async fn configure(&self, env: &mut dyn EnvironmentStore) -> Result<Report> {
        match self.try_configure(env).await {
            Ok(report) => Ok(report),
            Err(e) if self.options.fail_mode == FailMode::Exit => exit_with(&e),
            Err(e) => Err(e),
        }
    }

    /// Read the manifest and validate presence only. Never contacts the
    /// secret store and never writes to `env`.
    ///
    /// # Errors
    ///
    /// Returns manifest errors, or an I/O error if the dotenv file exists
    /// but cannot be read.
    pub fn check(&self, env: &dyn EnvironmentStore) -> Result<ResolutionResult> {
        let manifest = Manifest::load(&self.options.env_manifest)?;
        let snapshot = self.snapshot(env)?;
        Ok(presence::validate(
            &manifest,
            &snapshot,
            &self.options.secret_placeholder,
        ))
    }

    async fn try_configure(&self, env: &mut dyn EnvironmentStore) -> Result<Report> {
        let manifest = Manifest::load(&self.options.env_manifest)?;
        let snapshot = self.snapshot(env)?;

        let validated = presence::validate(&manifest, &snapshot, &self.options.secret_placeholder);
        if validated.has_missing() {
            if self.options.exit_on_missing {
                return Err(Error::MissingVariables(validated.missing));
            }
            warn!(
                missing = validated.missing.len(),
                "continuing without missing variables"
            );
        }
        let missing = validated.missing;

        let resolved = if validated.variables.iter().any(|v| v.is_secret_reference) {
            let store = self.store()?;
            resolve::resolve(store.as_ref(), validated.variables).await?
        } else {
            validated.variables.into_iter().map(Into::into).collect()
        };

        let secrets = resolved
            .iter()
            .filter(|v| v.from_secret)
            .map(|v| v.local_key.clone())
            .collect();

        let typed = coerce::coerce(resolved)?;
        let published = publish::publish(env, &typed)?;

        info!(
            manifest = %manifest.path().display(),
            published = published.len(),
            "environment configured"
        );

        Ok(Report {
            published,
            secrets,
            missing,
        })
    }

    /// Environment snapshot with the dotenv file merged in.
    fn snapshot(&self, env: &dyn EnvironmentStore) -> Result<BTreeMap<String, String>> {
        let mut snapshot = env.snapshot();

        if self.options.load_dotenv && self.options.dotenv.exists() {
            let dotenv = DotEnv::load(&self.options.dotenv)?;
            let added = dotenv.merge_into(&mut snapshot);
            debug!(path = %dotenv.path().display(), added, "merged dotenv");
        }

        Ok(snapshot)
    }

    fn store(&self) -> Result<Arc<dyn SecretStore>> {
        match &self.store {
            Some(store) => Ok(Arc::clone(store)),
            None => Ok(Arc::from(store::open(&self.options)?)),
        }
    }
}

/// Log a classified failure and end the process.
fn exit_with(e: &Error) -> ! {
    let kind = e.kind();
    error!(kind = kind.label(), "{}", e);
    eprintln!("envload: {}: {}", kind.label(), e);
    if let Some(hint) = e.hint() {
        eprintln!("envload: hint: {}", hint);
    }
    std::process::exit(1);
}

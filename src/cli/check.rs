//! Check command.
//!
//! Reads the manifest and reports which variables are present, missing or
//! secret-backed. Values are never printed and the secret store is never
//! contacted.

use serde_json::json;

use crate::cli::output::{self, Status};
use crate::core::config::Options;
use crate::core::env::ProcessEnv;
use crate::core::loader::Loader;
use crate::error::{Error, Result};

/// Report manifest presence for the current environment.
///
/// Fails with `Error::MissingVariables` when keys are missing and missing
/// variables are fatal.
pub fn execute(options: Options, json: bool) -> Result<()> {
    let manifest_path = options.env_manifest.display().to_string();
    let exit_on_missing = options.exit_on_missing;
    let result = Loader::new(options).check(&ProcessEnv)?;

    if json {
        let variables: Vec<_> = result
            .variables
            .iter()
            .map(|v| {
                json!({
                    "key": v.local_key,
                    "type": v.declared.as_str(),
                    "external_key": v.external_key,
                    "present": v.raw_value.is_some(),
                    "secret": v.is_secret_reference,
                })
            })
            .collect();
        let doc = json!({
            "manifest": manifest_path,
            "variables": variables,
            "missing": result.missing,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&doc).map_err(std::io::Error::from)?
        );
    } else {
        output::header("Manifest", &manifest_path);
        output::rule();
        for v in &result.variables {
            let (status, note) = match (&v.raw_value, v.is_secret_reference) {
                (None, _) => (Status::Missing, "missing".to_string()),
                (Some(_), true) => (Status::Secret, format!("secret → {}", v.external_key)),
                (Some(_), false) => (Status::Present, String::new()),
            };
            output::variable(status, &v.local_key, v.declared.as_str(), &note);
        }
        output::rule();

        if !result.has_missing() {
            output::success(&format!(
                "{} variables present, {} from secret store",
                result.variables.len(),
                result.secret_count()
            ));
        } else if !exit_on_missing {
            output::warn(&format!("{} variables missing", result.missing.len()));
        }
    }

    if result.has_missing() && exit_on_missing {
        return Err(Error::MissingVariables(result.missing));
    }

    Ok(())
}

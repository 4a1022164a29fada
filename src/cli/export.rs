//! Export command.
//!
//! Runs the full pipeline against a copy of the process environment and
//! prints the manifest variables as dotenv lines or JSON.

use std::path::PathBuf;

use zeroize::Zeroizing;

use crate::core::config::Options;
use crate::core::constants;
use crate::core::env::{DotEnv, EnvironmentStore, MemoryEnv, ProcessEnv};
use crate::core::loader::Loader;
use crate::error::Result;

/// Print the loaded variables.
pub async fn execute(options: Options, json: bool) -> Result<()> {
    let mut env = MemoryEnv::from_pairs(ProcessEnv.snapshot());
    let report = Loader::new(options).configure(&mut env).await?;

    let pairs: Vec<(String, String)> = report
        .published
        .iter()
        .filter_map(|key| Some((key.clone(), env.get(key)?.to_string())))
        .collect();

    let rendered = if json {
        let map: serde_json::Map<String, serde_json::Value> = pairs
            .into_iter()
            .map(|(k, v)| (k, serde_json::Value::String(v)))
            .collect();
        let mut out = serde_json::to_string_pretty(&map).map_err(std::io::Error::from)?;
        out.push('\n');
        Zeroizing::new(out)
    } else {
        Zeroizing::new(DotEnv::from_pairs(pairs, PathBuf::from(constants::ENV_FILE)).to_env_string())
    };

    print!("{}", rendered.as_str());
    Ok(())
}

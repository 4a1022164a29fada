//! Command-line interface.

pub mod check;
pub mod completions;
pub mod export;
pub mod output;
pub mod run;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::core::config::Options;
use crate::error::Result;

/// Envload - load a manifest of environment variables, resolving secrets.
#[derive(Parser)]
#[command(
    name = "envload",
    about = "Validate, resolve and load required environment variables",
    version
)]
pub struct Cli {
    #[command(flatten)]
    pub options: OptionArgs,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Flags that override `envload.toml`.
#[derive(Args, Debug, Default)]
pub struct OptionArgs {
    /// Options file (default: ./envload.toml when present)
    #[arg(long, global = true, env = "ENVLOAD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Env manifest path (default: required-env.json)
    #[arg(short, long, global = true, env = "ENVLOAD_MANIFEST")]
    pub manifest: Option<PathBuf>,

    /// Secret store backend: azure, file, memory
    #[arg(long, global = true, env = "ENVLOAD_STORE")]
    pub store: Option<String>,

    /// Azure Key Vault name, or secrets file path for the file store
    #[arg(long, global = true, env = "AZURE_KEY_VAULT")]
    pub vault: Option<String>,

    /// Value that marks a variable as secret-backed (default: FROM_SECRET)
    #[arg(long, global = true)]
    pub placeholder: Option<String>,

    /// Continue when required variables are missing
    #[arg(long, global = true)]
    pub allow_missing: bool,

    /// Dotenv file to merge before validation (default: .env)
    #[arg(long, global = true, conflicts_with = "no_dotenv")]
    pub dotenv: Option<PathBuf>,

    /// Do not read a dotenv file
    #[arg(long, global = true)]
    pub no_dotenv: bool,
}

impl OptionArgs {
    /// Resolve options: defaults, then the options file, then flags.
    ///
    /// `fail_mode` has no flag and always comes from the options file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the options file cannot be loaded.
    pub fn resolve(&self) -> Result<Options> {
        let mut options = match &self.config {
            Some(path) => Options::load(path)?,
            None => Options::discover(".")?,
        };

        if let Some(manifest) = &self.manifest {
            options.env_manifest = manifest.clone();
        }
        if let Some(store) = &self.store {
            options.secret_store = store.clone();
        }
        if let Some(vault) = &self.vault {
            options.vault = Some(vault.clone());
        }
        if let Some(placeholder) = &self.placeholder {
            options.secret_placeholder = placeholder.clone();
        }
        if self.allow_missing {
            options.exit_on_missing = false;
        }
        if let Some(dotenv) = &self.dotenv {
            options.dotenv = dotenv.clone();
        }
        if self.no_dotenv {
            options.load_dotenv = false;
        }

        Ok(options)
    }
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Check that every manifest variable is present (never contacts the secret store)
    Check {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Load the manifest and run a command with the resulting environment
    Run {
        /// Command and arguments to run
        #[arg(trailing_var_arg = true, required = true)]
        command: Vec<String>,
    },

    /// Load the manifest and print the resulting variables
    Export {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Execute a command.
pub async fn execute(command: Command, args: &OptionArgs) -> Result<()> {
    use Command::*;

    match command {
        Check { json } => check::execute(args.resolve()?, json),
        Run { command } => run::execute(args.resolve()?, &command).await,
        Export { json } => export::execute(args.resolve()?, json).await,
        Completions { shell } => completions::execute(shell),
    }
}

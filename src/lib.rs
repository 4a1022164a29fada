//! Envload - load required environment variables at process startup.
//!
//! Reads a manifest of required variables and their types, checks that each
//! one is set, replaces secret placeholders with values from a secret store,
//! coerces every value to its declared type and publishes the result into
//! the environment.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── check         # Presence report, no secret store access
//! │   ├── run           # Run a command with the loaded environment
//! │   ├── export        # Print loaded variables
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── manifest      # required-env.json parsing
//!     ├── presence      # Presence validation
//!     ├── resolve       # Secret resolution
//!     ├── coerce        # Type coercion
//!     ├── publish       # Publication into an environment store
//!     ├── loader        # The configure pipeline
//!     ├── config        # envload.toml options
//!     ├── env           # Environment stores and .env files
//!     └── store/        # Secret store backends
//!         ├── azure     # Azure Key Vault via the az CLI
//!         ├── file      # JSON secrets file
//!         └── memory    # In-process map
//! ```
//!
//! # Example
//!
//! ```no_run
//! use envload::core::config::Options;
//! use envload::core::env::ProcessEnv;
//! use envload::core::loader::Loader;
//!
//! # async fn start() -> envload::error::Result<()> {
//! let options = Options {
//!     vault: Some("kv-shared-dev-southeast".to_string()),
//!     ..Options::default()
//! };
//! let report = Loader::new(options).configure(&mut ProcessEnv).await?;
//! println!("loaded {} variables", report.published.len());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod core;
pub mod error;

pub use crate::core::config::{FailMode, Options};
pub use crate::core::loader::{Loader, Report};
pub use crate::error::{Error, Result};

//! Run command.
//!
//! Loads the manifest into the process environment, then runs a command
//! that inherits it.

use crate::core::config::Options;
use crate::core::env::ProcessEnv;
use crate::core::loader::Loader;
use crate::error::Result;

/// Load the environment and run `command`, exiting with its status.
pub async fn execute(options: Options, command: &[String]) -> Result<()> {
    let Some((program, args)) = command.split_first() else {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "no command specified",
        )
        .into());
    };

    let report = Loader::new(options).configure(&mut ProcessEnv).await?;
    tracing::debug!(
        published = report.published.len(),
        secrets = report.secrets.len(),
        program = %program,
        "starting command"
    );

    let status = std::process::Command::new(program).args(args).status()?;
    // Killed by a signal: no exit code, report failure
    std::process::exit(status.code().unwrap_or(1));
}

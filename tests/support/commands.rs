//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

/// Variables that would leak options from the developer's shell.
const OPTION_VARS: &[&str] = &[
    "ENVLOAD_CONFIG",
    "ENVLOAD_MANIFEST",
    "ENVLOAD_STORE",
    "ENVLOAD_LOG",
    "AZURE_KEY_VAULT",
];

impl Test {
    /// Create an envload command running in the project directory.
    ///
    /// Option variables from the outer environment are removed and colors
    /// are disabled.
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("envload").expect("failed to find envload binary");
        for var in OPTION_VARS {
            cmd.env_remove(var);
        }
        cmd.env("NO_COLOR", "1");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Shortcut for `envload check`.
    pub fn check(&self, env: &[(&str, &str)]) -> Output {
        self.cmd()
            .arg("check")
            .envs(env.iter().copied())
            .output()
            .expect("failed to run envload check")
    }

    /// Shortcut for `envload export` against the file secret store.
    pub fn export(&self, env: &[(&str, &str)], extra: &[&str]) -> Output {
        self.cmd()
            .args(["--store", "file", "--vault", super::SECRETS_FILE, "export"])
            .args(extra)
            .envs(env.iter().copied())
            .output()
            .expect("failed to run envload export")
    }

    /// Shortcut for `envload run -- <command>` against the file secret store.
    pub fn run(&self, env: &[(&str, &str)], command: &[&str]) -> Output {
        self.cmd()
            .args(["--store", "file", "--vault", super::SECRETS_FILE, "run", "--"])
            .args(command)
            .envs(env.iter().copied())
            .output()
            .expect("failed to run envload run")
    }
}

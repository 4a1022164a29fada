//! Tests for error reporting and CLI flags.

use crate::support::*;

#[test]
fn test_help() {
    let t = Test::new();

    let output = t.cmd().arg("--help").output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "Usage");
}

#[test]
fn test_unknown_command_fails() {
    let t = Test::new();

    let output = t.cmd().arg("unknown-command").output().unwrap();
    assert_failure(&output);
}

#[test]
fn test_version_flag() {
    let t = Test::new();

    let output = t.cmd().arg("--version").output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "envload");
}

#[test]
fn test_missing_manifest_names_path() {
    let t = Test::new();

    let output = t.check(&[]);
    assert_failure(&output);
    assert_stderr_contains(
        &output,
        "unable to find required env manifest file 'required-env.json'",
    );
    assert_stderr_contains(&output, "--manifest");
}

#[test]
fn test_custom_manifest_path() {
    let t = Test::new();
    t.write("env.json", r#"{"ENVLOAD_T_NAME": ""}"#);

    let output = t
        .cmd()
        .args(["--manifest", "env.json", "check"])
        .env("ENVLOAD_T_NAME", "x")
        .output()
        .unwrap();
    assert_success(&output);
}

#[test]
fn test_invalid_manifest_json() {
    let t = Test::with_manifest("{ not json");

    let output = t.check(&[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "is not valid JSON");
}

#[test]
fn test_duplicate_manifest_key() {
    let t = Test::with_manifest(r#"{"ENVLOAD_T_A": "", "ENVLOAD_T_A": 0}"#);

    let output = t.check(&[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "declares 'ENVLOAD_T_A' more than once");
}

#[test]
fn test_options_file_is_discovered() {
    let t = Test::new();
    t.write("envload.toml", "env_manifest = \"conf.json\"\n");
    t.write("conf.json", r#"{"ENVLOAD_T_NAME": ""}"#);

    let output = t.check(&[("ENVLOAD_T_NAME", "x")]);
    assert_success(&output);
}

#[test]
fn test_bad_options_file() {
    let t = Test::with_manifest("{}");
    t.write("envload.toml", "no_such_option = 1\n");

    let output = t.check(&[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "failed to parse config");
}

#[test]
fn test_unknown_store() {
    let t = Test::with_manifest(r#"{"ENVLOAD_T_PASSWORD": ""}"#);

    let output = t
        .cmd()
        .args(["--store", "hashicorp", "export"])
        .env("ENVLOAD_T_PASSWORD", "FROM_SECRET")
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "unsupported secret store: hashicorp");
}

#[test]
fn test_completions_bash_outputs_script() {
    let t = Test::new();

    let output = t.cmd().args(["completions", "bash"]).output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "envload");
}

#[test]
fn test_verbose_logs_to_stderr_only() {
    let t = Test::with_manifest(r#"{"ENVLOAD_T_NAME": ""}"#);

    let output = t
        .cmd()
        .args(["--verbose", "export"])
        .env("ENVLOAD_T_NAME", "x")
        .output()
        .unwrap();
    assert_success(&output);
    assert_eq!(stdout(&output), "ENVLOAD_T_NAME=x\n");
}

#[test]
fn test_invalid_option_value_names_file() {
    use predicates::prelude::*;

    let t = Test::with_manifest("{}");
    t.write("envload.toml", "fail_mode = \"panic\"\n");

    t.cmd()
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("envload.toml").and(predicate::str::contains("fail_mode")));
}

#[test]
fn test_exit_mode_reports_missing_variables() {
    let t = Test::with_manifest(r#"{"ENVLOAD_T_UNSET_PORT": 0}"#);
    t.write("envload.toml", "fail_mode = \"exit\"\n");

    let output = t.cmd().arg("export").output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert_stderr_contains(&output, "envload: missing variables:");
    assert_stderr_contains(&output, "ENVLOAD_T_UNSET_PORT");
    assert_stderr_contains(&output, "envload: hint: ");
    assert!(!stderr(&output).contains("✗"));
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_exit_mode_reports_coercion_failure() {
    let t = Test::with_manifest(r#"{"ENVLOAD_T_RATE": 0.0}"#);
    t.write("envload.toml", "fail_mode = \"exit\"\n");

    let output = t
        .cmd()
        .arg("export")
        .env("ENVLOAD_T_RATE", "fast")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert_stderr_contains(&output, "envload: type coercion failed:");
    assert_stderr_contains(&output, "'ENVLOAD_T_RATE' must be float, got 'fast'");
    assert!(stdout(&output).is_empty());
}

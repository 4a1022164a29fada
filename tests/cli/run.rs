//! Tests for `envload run`.

use crate::support::*;

#[cfg(unix)]
#[test]
fn test_run_injects_resolved_environment() {
    let t = Test::with_manifest(FULL_MANIFEST);
    t.write(SECRETS_FILE, SECRETS);

    let output = t.run(
        FULL_ENV,
        &["sh", "-c", "echo \"$DB_PASSWORD:$DB_PORT:$DEBUG\""],
    );
    assert_success(&output);
    assert_eq!(stdout(&output).trim(), "s3cr3t:5432:true");
}

#[cfg(unix)]
#[test]
fn test_run_passes_exit_code() {
    let t = Test::with_manifest("{}");
    t.write(SECRETS_FILE, "{}");

    let output = t.run(&[], &["sh", "-c", "exit 7"]);
    assert_eq!(output.status.code(), Some(7));
}

#[cfg(unix)]
#[test]
fn test_run_does_not_start_command_on_failure() {
    let t = Test::with_manifest(r#"{"ENVLOAD_T_DB_PORT": 0}"#);
    t.write(SECRETS_FILE, "{}");

    let marker = t.path("ran");
    let script = format!("touch {}", marker.display());

    let output = t.run(&[], &["sh", "-c", &script]);
    assert_failure(&output);
    assert!(!marker.exists());
}

#[test]
fn test_run_requires_command() {
    let t = Test::with_manifest("{}");

    let output = t.cmd().arg("run").output().unwrap();
    assert_failure(&output);
}

//! Tests for `envload check`.

use crate::support::*;

#[test]
fn test_check_all_present() {
    let t = Test::with_manifest(FULL_MANIFEST);

    let output = t.check(FULL_ENV);
    assert_success(&output);
    assert_stdout_contains(&output, "5 variables present, 1 from secret store");
    assert_stdout_contains(&output, "DB-PASSWORD");
}

#[test]
fn test_check_never_prints_values() {
    let t = Test::with_manifest(FULL_MANIFEST);

    let output = t.check(FULL_ENV);
    assert_success(&output);
    assert_output_excludes(&output, "localhost");
    assert_output_excludes(&output, "5432");
}

#[test]
fn test_check_missing_fails() {
    let t = Test::with_manifest(r#"{"ENVLOAD_T_DB_PORT": 0}"#);

    let output = t.check(&[]);
    assert_failure(&output);
    assert_stdout_contains(&output, "missing");
    assert_stderr_contains(&output, "missing required environment variables: ENVLOAD_T_DB_PORT");
    assert_stderr_contains(&output, "--allow-missing");
}

#[test]
fn test_check_allow_missing() {
    let t = Test::with_manifest(r#"{"ENVLOAD_T_DB_PORT": 0}"#);

    let output = t
        .cmd()
        .args(["--allow-missing", "check"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_stderr_contains(&output, "1 variables missing");
}

#[test]
fn test_check_reads_dotenv() {
    let t = Test::with_manifest(r#"{"ENVLOAD_T_DB_PORT": 0}"#);
    t.write(".env", "ENVLOAD_T_DB_PORT=5432\n");

    let output = t.check(&[]);
    assert_success(&output);

    let output = t.cmd().args(["--no-dotenv", "check"]).output().unwrap();
    assert_failure(&output);
}

#[test]
fn test_check_json() {
    let t = Test::with_manifest(r#"{"ENVLOAD_T_A_B_C": "", "ENVLOAD_T_PORT": 0}"#);

    let output = t
        .cmd()
        .args(["--allow-missing", "check", "--json"])
        .env("ENVLOAD_T_A_B_C", "FROM_SECRET")
        .output()
        .unwrap();
    assert_success(&output);

    let doc: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(doc["missing"], serde_json::json!(["ENVLOAD_T_PORT"]));
    assert_eq!(doc["variables"][0]["external_key"], "ENVLOAD-T_A_B_C");
    assert_eq!(doc["variables"][0]["secret"], true);
    assert_eq!(doc["variables"][1]["type"], "integer");
    assert_eq!(doc["variables"][1]["present"], false);
}

#[test]
fn test_check_does_not_open_secret_store() {
    let t = Test::with_manifest(FULL_MANIFEST);

    // azure without a vault cannot be opened, check must not try
    let output = t
        .cmd()
        .args(["--store", "azure", "check"])
        .envs(FULL_ENV.iter().copied())
        .output()
        .unwrap();
    assert_success(&output);
}

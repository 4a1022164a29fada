//! Tests for `envload export`.

use crate::support::*;

#[test]
fn test_export_resolves_and_coerces() {
    let t = Test::with_manifest(FULL_MANIFEST);
    t.write(SECRETS_FILE, SECRETS);

    let output = t.export(FULL_ENV, &[]);
    assert_success(&output);

    let out = stdout(&output);
    assert_eq!(
        out,
        "DB_HOST=localhost\nDB_PORT=5432\nDB_PASSWORD=s3cr3t\nRATIO=0.75\nDEBUG=true\n"
    );
}

#[test]
fn test_export_json() {
    let t = Test::with_manifest(FULL_MANIFEST);
    t.write(SECRETS_FILE, SECRETS);

    let output = t.export(FULL_ENV, &["--json"]);
    assert_success(&output);

    let doc: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(doc["DB_PASSWORD"], "s3cr3t");
    assert_eq!(doc["DEBUG"], "true");
}

#[test]
fn test_export_missing_secret_fails() {
    let t = Test::with_manifest(FULL_MANIFEST);
    t.write(SECRETS_FILE, "{}");

    let output = t.export(FULL_ENV, &[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "DB-PASSWORD");
    assert_stderr_contains(&output, "DB_PASSWORD");
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_export_coercion_error_quotes_value() {
    let t = Test::with_manifest(r#"{"FLOAT_NUMBER": 0.0}"#);

    let output = t.export(&[("FLOAT_NUMBER", "notafloat")], &[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "FLOAT_NUMBER");
    assert_stderr_contains(&output, "notafloat");
}

#[test]
fn test_export_coercion_error_redacts_secret() {
    let t = Test::with_manifest(r#"{"DB_PORT": 0}"#);
    t.write(SECRETS_FILE, r#"{"DB-PORT": "hunter2"}"#);

    let output = t.export(&[("DB_PORT", "FROM_SECRET")], &["--verbose"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "DB_PORT");
    assert_stderr_contains(&output, "<redacted>");
    assert_output_excludes(&output, "hunter2");
}

#[test]
fn test_export_custom_placeholder() {
    let t = Test::with_manifest(r#"{"API_KEY": ""}"#);
    t.write(SECRETS_FILE, r#"{"API-KEY": "k-123"}"#);

    let output = t
        .cmd()
        .args(["--store", "file", "--vault", SECRETS_FILE, "--placeholder", "@vault", "export"])
        .env("API_KEY", "@vault")
        .output()
        .unwrap();
    assert_success(&output);
    assert_eq!(stdout(&output), "API_KEY=k-123\n");
}

//! Offline CLI tests for s3cp
//!
//! These exercise argument handling and the error paths that must fail
//! before any request reaches a storage service.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

/// Run s3cp with an isolated config directory and no reachable AWS metadata
fn run_s3cp(args: &[&str], config_dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_s3cp"))
        .args(args)
        .env("S3CP_CONFIG_DIR", config_dir)
        .env("AWS_REGION", "us-east-1")
        .env("AWS_EC2_METADATA_DISABLED", "true")
        .env_remove("RUST_LOG")
        .env_remove("S3CP_ENDPOINT_URL")
        .env_remove("S3CP_REGION")
        .output()
        .expect("Failed to execute s3cp")
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn test_no_arguments_is_usage_error() {
    let config_dir = TempDir::new().unwrap();
    let output = run_s3cp(&[], config_dir.path());

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Usage"));
}

#[test]
fn test_single_argument_is_usage_error() {
    let config_dir = TempDir::new().unwrap();
    let output = run_s3cp(&["report.csv"], config_dir.path());

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_help_exits_zero() {
    let config_dir = TempDir::new().unwrap();
    let output = run_s3cp(&["--help"], config_dir.path());

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--acl"));
}

#[test]
fn test_neither_side_remote() {
    let config_dir = TempDir::new().unwrap();
    let output = run_s3cp(&["/tmp/a.txt", "/tmp/b.txt"], config_dir.path());

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("s3:// URL"), "stderr: {err}");
    assert!(err.contains("Usage"), "stderr: {err}");
}

#[test]
fn test_both_sides_remote() {
    let config_dir = TempDir::new().unwrap();
    let output = run_s3cp(&["s3://a/x", "s3://b/y"], config_dir.path());

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Only one of"));
}

#[test]
fn test_download_without_key_creates_nothing() {
    let config_dir = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let dst = work.path().join("out.txt");

    let output = run_s3cp(
        &["s3://bucket/", dst.to_str().unwrap()],
        config_dir.path(),
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Key missing"));
    assert!(!dst.exists());
}

#[test]
fn test_upload_missing_local_file() {
    let config_dir = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let src = work.path().join("absent.csv");

    let output = run_s3cp(
        &[src.to_str().unwrap(), "s3://bucket/"],
        config_dir.path(),
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("absent.csv"));
}

#[test]
fn test_json_error_output() {
    let config_dir = TempDir::new().unwrap();
    let output = run_s3cp(&["--json", "a.txt", "b.txt"], config_dir.path());

    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value =
        serde_json::from_str(&stderr(&output)).expect("stderr should be JSON");
    assert!(value["error"].as_str().unwrap().contains("s3:// URL"));
}

#[test]
fn test_config_output_json() {
    let config_dir = TempDir::new().unwrap();
    std::fs::write(
        config_dir.path().join("config.toml"),
        "schema_version = 1\n[defaults]\noutput = \"json\"\n",
    )
    .unwrap();

    let output = run_s3cp(&["a.txt", "b.txt"], config_dir.path());

    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value =
        serde_json::from_str(&stderr(&output)).expect("stderr should be JSON");
    assert!(value.get("error").is_some());
}

#[test]
fn test_invalid_config_file() {
    let config_dir = TempDir::new().unwrap();
    std::fs::write(config_dir.path().join("config.toml"), "schema_version = 99\n").unwrap();

    let output = run_s3cp(&["a.txt", "s3://bucket/"], config_dir.path());

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("newer than supported"));
}

#[test]
fn test_unknown_output_format_in_config() {
    let config_dir = TempDir::new().unwrap();
    std::fs::write(
        config_dir.path().join("config.toml"),
        "schema_version = 1\n[defaults]\noutput = \"yaml\"\n",
    )
    .unwrap();

    let output = run_s3cp(&["a.txt", "s3://bucket/"], config_dir.path());

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Unknown output format 'yaml'"));
}

#[test]
fn test_completions() {
    let config_dir = TempDir::new().unwrap();
    let output = run_s3cp(&["--completions", "bash"], config_dir.path());

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("s3cp"));
}

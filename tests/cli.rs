//! Integration tests for top-level CLI behavior.

use std::path::Path;
use std::process::Command;

fn run_uploader(args: &[&str]) -> std::process::Output {
    let bin = env!("CARGO_BIN_EXE_nexus-uploader");
    Command::new(bin)
        .args(args)
        .env_remove("NEXUS_AUTH")
        .env_remove("NEXUS_UPLOADER_RECORD")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run nexus-uploader binary")
}

fn write_artifact(root: &Path, group: &str, artifact: &str, version: &str, files: &[&str]) {
    let dir = root.join(group.replace('.', "/")).join(artifact).join(version);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join(format!("{artifact}-{version}.pom")), "<project/>").unwrap();
    for file in files {
        std::fs::write(dir.join(file), "data").unwrap();
    }
}

#[test]
fn help_lists_flags() {
    let output = run_uploader(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("--repo-url"));
    assert!(stdout.contains("--include-group"));
    assert!(stdout.contains("--force-upload"));
    assert!(stdout.contains("--limit"));
}

#[test]
fn missing_required_arguments_is_a_usage_error() {
    let output = run_uploader(&[]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr.contains("--repo-url") || stderr.contains("REPODIRS"));
}

#[test]
fn invalid_url_fails_before_scanning() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().to_str().unwrap();
    let output = run_uploader(&[root, "--repo-url", "localhost", "--repo-id", "releases"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("invalid repository URL") || stderr.contains("localhost"));
}

#[test]
fn malformed_credentials_fail() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().to_str().unwrap();
    let output = run_uploader(&[
        root,
        "--repo-url",
        "http://localhost:8081",
        "--repo-id",
        "releases",
        "--auth",
        "no-colon",
    ]);
    assert!(!output.status.success());
}

#[test]
fn missing_root_fails() {
    let output = run_uploader(&[
        "/definitely/not/a/repo",
        "--repo-url",
        "http://localhost:8081",
        "--repo-id",
        "releases",
    ]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("/definitely/not/a/repo"));
}

#[test]
fn dry_run_applies_filters_and_limit() {
    let dir = tempfile::tempdir().unwrap();
    write_artifact(dir.path(), "com.acme", "widget", "1.0", &["widget-1.0.jar"]);
    write_artifact(dir.path(), "com.acme", "gadget", "3.1", &["gadget-3.1-sources.jar"]);
    write_artifact(dir.path(), "org.other", "thing", "0.1", &[]);

    let root = dir.path().to_str().unwrap();
    let output = run_uploader(&[
        root,
        "--repo-url",
        "http://127.0.0.1:9",
        "--repo-id",
        "releases",
        "--ig",
        r"com\.acme",
        "--dry-run",
        "-q",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout.contains("com.acme:widget"));
    assert!(stdout.contains("gadget-3.1-sources.jar [sources]"));
    assert!(!stdout.contains("org.other"));
    assert!(stdout.contains("2 artifact(s) selected (1 filtered out"));
}

#[test]
fn unreachable_server_is_not_fatal_by_default() {
    let dir = tempfile::tempdir().unwrap();
    write_artifact(dir.path(), "com.acme", "widget", "1.0", &["widget-1.0.jar"]);
    let root = dir.path().to_str().unwrap();
    let args = [root, "--repo-url", "http://127.0.0.1:9", "--repo-id", "releases", "-q"];

    let output = run_uploader(&args);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("1 failed"));

    let mut strict = args.to_vec();
    strict.push("--strict");
    let output = run_uploader(&strict);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("1 artifact(s) failed to upload"));
}

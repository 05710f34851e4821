//! Tests for the legacy-objconv command line

use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};

use pretty_assertions::assert_eq;
use tempfile::TempDir;

const FIXTURE: &str = include_str!("fixtures/legacy-objects.cfg");
const EXPECTED: &str = include_str!("fixtures/legacy-objects.conf");

fn objconv() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_legacy-objconv"));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn run_with_stdin(mut cmd: Command, input: &str) -> Output {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("should start binary");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_bytes())
        .expect("should write stdin");
    child.wait_with_output().expect("should finish")
}

#[test]
fn test_stdin_to_stdout() {
    let output = run_with_stdin(objconv(), FIXTURE);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), EXPECTED);
}

#[test]
fn test_file_input_with_config() {
    let dir = TempDir::new().expect("should create temp dir");
    let input = dir.path().join("objects.cfg");
    let config = dir.path().join("objconv.toml");
    fs::write(&input, FIXTURE).expect("should write input");
    fs::write(&config, "[bridge]\nname = \"plugin-service\"\n").expect("should write config");

    let output = objconv()
        .arg("--config")
        .arg(&config)
        .arg(&input)
        .output()
        .expect("should run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with(r#"abstract object service "plugin-service" {"#));
    assert!(!stdout.contains("nagios-service"));
}

#[test]
fn test_missing_config_exits_with_error() {
    let dir = TempDir::new().expect("should create temp dir");
    let output = objconv()
        .arg("-c")
        .arg(dir.path().join("missing.toml"))
        .output()
        .expect("should run");
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error loading settings"));
}

#[test]
fn test_invalid_config_exits_with_error() {
    let dir = TempDir::new().expect("should create temp dir");
    let config = dir.path().join("bad.toml");
    fs::write(&config, "[output]\nescape = \"markdown\"\n").expect("should write config");

    let output = objconv()
        .arg("--config")
        .arg(&config)
        .output()
        .expect("should run");
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to parse settings TOML"));
}

#[test]
fn test_syntax_error_prints_nothing_on_stdout() {
    let input = "define host {\n  host_name a\n}\nbogus line\n";
    let output = run_with_stdin(objconv(), input);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("syntax error on line 4"));
    assert!(stderr.contains("<stdin>"));
}

#[test]
fn test_missing_input_file_exits_with_error() {
    let dir = TempDir::new().expect("should create temp dir");
    let output = objconv()
        .arg(dir.path().join("nope.cfg"))
        .output()
        .expect("should run");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error reading file"));
}

#[test]
fn test_lint_warnings_go_to_stderr() {
    let input = "define host {\n  host_name web1\n  use missing-template\n}\n";
    let mut cmd = objconv();
    cmd.arg("--lint");
    let output = run_with_stdin(cmd, input);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stdout.contains(r#"object host "web1" inherits "missing-template" {"#));
    assert!(stderr.contains(r#"inherits unknown host "missing-template""#));
    assert!(!stdout.contains("unknown"));
}

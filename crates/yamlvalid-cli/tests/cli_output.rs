//! # CLI Output Tests
//!
//! Runs the built `yamlvalid` binary against manifests on disk and checks
//! stdout and the exit status, the way a CI job would consume them.

use std::path::Path;
use std::process::{Command, Output};

fn yamlvalid(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_yamlvalid"))
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("binary should run")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

const SCENARIO: &str = r#"metadata:
  name: ""
spec:
  os: macos
  containers:
    - name: web
      ports:
        - containerPort: 70000
"#;

#[test]
fn usage_without_arguments() {
    let dir = tempfile::tempdir().unwrap();
    let output = yamlvalid(&[], dir.path());
    assert!(output.status.success());
    assert_eq!(stdout(&output), "Usage: yamlvalid <filename>\n");
}

#[test]
fn findings_are_printed_and_exit_is_zero() {
    let dir = tempfile::tempdir().unwrap();
    let sub = dir.path().join("manifests");
    std::fs::create_dir_all(&sub).unwrap();
    std::fs::write(sub.join("pod.yaml"), SCENARIO).unwrap();

    let output = yamlvalid(&["manifests/pod.yaml"], dir.path());
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "pod.yaml:4 name is required\n\
         pod.yaml:10 os has unsupported value 'macos'\n\
         pod.yaml:15 containerPort value out of range\n"
    );
}

#[test]
fn strict_flag_sets_exit_status() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("pod.yaml"), SCENARIO).unwrap();

    let output = yamlvalid(&["--strict", "pod.yaml"], dir.path());
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output).lines().count(), 3);
}

#[test]
fn missing_file_is_reported_on_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let output = yamlvalid(&["nothere.yaml"], dir.path());
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("nothere.yaml: unable to read file: "));
}

#[test]
fn decode_error_is_reported_on_stdout() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("bad.yaml"), "spec: [unclosed\n").unwrap();
    let output = yamlvalid(&["bad.yaml"], dir.path());
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("YAML decode error: "));
}

#[test]
fn bad_config_exits_with_error_status() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("lint.yaml"), "allowed_os: []\n").unwrap();
    std::fs::write(dir.path().join("pod.yaml"), SCENARIO).unwrap();
    let output = yamlvalid(&["--config", "lint.yaml", "pod.yaml"], dir.path());
    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).is_empty());
}

#[test]
fn list_rules_prints_every_rule() {
    let dir = tempfile::tempdir().unwrap();
    let output = yamlvalid(&["--list-rules"], dir.path());
    assert!(output.status.success());
    let ids: Vec<String> = stdout(&output)
        .lines()
        .map(|line| line.split('\t').next().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec!["4", "10", "12", "15", "20", "24", "27", "30"]);
}

//! CLI integration tests.
//!
//! These exercise argument handling and configuration errors only; paths
//! that reach the network are covered by the library tests with a
//! scripted platform.

use std::process::Command;

fn vigil_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_vigil"));
    // Keep the test hermetic even if the host shell exports a base URL.
    cmd.env_remove("VIGIL_API_BASE");
    cmd
}

#[test]
fn test_cli_help() {
    let output = vigil_cmd().arg("--help").output().expect("run");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Deployment status watcher"));
    assert!(stdout.contains("watch"));
    assert!(stdout.contains("deploy"));
}

#[test]
fn test_cli_requires_api_base() {
    let output = vigil_cmd().arg("list").output().expect("run");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("VIGIL_API_BASE"));
}

#[test]
fn test_cli_rejects_unknown_subcommand() {
    let output = vigil_cmd().arg("frobnicate").output().expect("run");

    assert!(!output.status.success());
}

#[test]
fn test_cli_rejects_non_numeric_model_id() {
    let output = vigil_cmd()
        .args(["--api-base", "https://platform.example.com", "watch", "abc"])
        .output()
        .expect("run");

    assert!(!output.status.success());
}

//! Tests for error handling and CLI flags.

use crate::support::*;

#[test]
fn test_help_lists_commands() {
    let t = Test::new();

    let output = t.cmd().arg("--help").output().unwrap();
    assert_success(&output);
    let out = stdout(&output);
    for command in ["init", "credentials", "check", "status", "completions"] {
        assert!(out.contains(command), "help missing {}", command);
    }
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
    assert_stdout_contains(&output, "nvoi");
}

#[test]
fn test_verbose_logs_to_stderr() {
    let t = Test::init("shop");

    let output = t.cmd().args(["-v", "credentials", "show"]).output().unwrap();
    assert_success(&output);
    assert_stderr_contains(&output, "master key resolved");
    // logs never go to stdout, which carries the YAML
    assert_stdout_excludes(&output, "DEBUG");
}

#[test]
fn test_log_env_overrides_verbose() {
    let t = Test::init("shop");

    let output = t
        .cmd()
        .env("NVOI_LOG", "off")
        .args(["-v", "credentials", "show"])
        .output()
        .unwrap();
    assert_success(&output);
    assert!(stderr(&output).is_empty());
}

#[test]
fn test_key_never_logged() {
    let t = Test::init("shop");
    let key = t.key_hex();

    let output = t.cmd().args(["-v", "status"]).output().unwrap();
    assert_success(&output);
    assert!(!stderr(&output).contains(&key));
    assert!(!stdout(&output).contains(&key));
}

#[test]
fn test_completions() {
    let t = Test::new();

    let output = t.cmd().args(["completions", "bash"]).output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "nvoi");
}

#[test]
fn test_corrupted_credentials() {
    let t = Test::init("shop");
    let path = t.path("deploy.enc");
    let mut bytes = std::fs::read(&path).unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0x01;
    std::fs::write(&path, bytes).unwrap();

    let output = t.show();
    assert_failure(&output);
    assert_stderr_contains(&output, "decryption failed");
}

#[test]
fn test_truncated_credentials() {
    let t = Test::init("shop");
    std::fs::write(t.path("deploy.enc"), [0u8; 10]).unwrap();

    let output = t.show();
    assert_failure(&output);
    assert_stderr_contains(&output, "too short");
}

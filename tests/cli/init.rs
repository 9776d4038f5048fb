//! Tests for `nvoi init`.

use crate::support::*;
use std::fs;

#[test]
fn test_init_creates_credentials_and_key() {
    let t = Test::new();

    let output = t.init_cmd("shop");
    assert_success(&output);
    assert_stdout_contains(&output, "initialized");

    assert!(t.path("deploy.enc").exists(), "deploy.enc should exist");
    let key = t.key_hex();
    assert_eq!(key.len(), 64);
    assert!(key.chars().all(|c| c.is_ascii_hexdigit()));

    // key file is one line with a trailing newline
    let raw = fs::read_to_string(t.path("deploy.key")).unwrap();
    assert!(raw.ends_with('\n'));
    assert_eq!(raw.lines().count(), 1);
}

#[cfg(unix)]
#[test]
fn test_init_files_are_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let t = Test::init("shop");
    for name in ["deploy.key", "deploy.enc"] {
        let mode = fs::metadata(t.path(name)).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600, "{} has mode {:o}", name, mode);
    }
}

#[test]
fn test_init_template_has_name() {
    let t = Test::init("shop");
    assert!(t.plaintext().contains("name: shop"));
}

#[test]
fn test_init_ciphertext_is_not_plaintext() {
    let t = Test::init("shop");
    let raw = fs::read(t.path("deploy.enc")).unwrap();
    assert!(!String::from_utf8_lossy(&raw).contains("application"));
}

#[test]
fn test_init_twice_fails() {
    let t = Test::init("shop");

    let output = t.init_cmd("shop");
    assert_failure(&output);
    assert_stderr_contains(&output, "already initialized");
}

#[test]
fn test_init_refuses_existing_key_file() {
    let t = Test::new();
    fs::write(t.path("deploy.key"), format!("{}\n", TEST_KEY)).unwrap();

    let output = t.init_cmd("shop");
    assert_failure(&output);
    assert_stderr_contains(&output, "key file already exists");
    assert!(!t.path("deploy.enc").exists());
}

#[test]
fn test_init_updates_gitignore() {
    let t = Test::new();
    fs::write(t.path(".gitignore"), "target/").unwrap();

    assert_success(&t.init_cmd("shop"));

    let gitignore = fs::read_to_string(t.path(".gitignore")).unwrap();
    assert!(gitignore.starts_with("target/\n"));
    assert!(gitignore.lines().any(|l| l == "deploy.key"));
    assert!(gitignore.contains("# nvoi master key"));
}

#[test]
fn test_init_with_explicit_credentials_path() {
    let t = Test::new();

    let output = t
        .cmd()
        .args(["--credentials", "secrets/prod.enc", "init", "--name", "shop"])
        .output()
        .unwrap();
    assert_success(&output);

    assert!(t.path("secrets/prod.enc").exists());
    assert!(t.path("secrets/deploy.key").exists());
    assert!(!t.path("deploy.enc").exists());
}

#[test]
fn test_init_warns_when_env_key_shadows() {
    let t = Test::new();

    let output = t
        .cmd()
        .env("NVOI_MASTER_KEY", TEST_KEY)
        .args(["init", "--name", "shop"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "takes precedence");
}

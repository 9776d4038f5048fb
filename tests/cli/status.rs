//! Tests for `nvoi status`.

use crate::support::*;

#[test]
fn test_status_uninitialized() {
    let t = Test::new();

    let output = t.status();
    assert_success(&output);
    assert_stdout_contains(&output, "deploy.enc");
    assert_stdout_contains(&output, "no");
    assert_stdout_contains(&output, "not found");
}

#[test]
fn test_status_reports_key_file_and_fingerprint() {
    let t = Test::init("shop");

    let output = t.status();
    assert_success(&output);
    assert_stdout_contains(&output, "yes");
    assert_stdout_contains(&output, "deploy.key");

    let key = nvoi::core::domain::MasterKey::from_hex(&t.key_hex()).unwrap();
    assert_stdout_contains(&output, &key.fingerprint());
    assert_stdout_excludes(&output, &t.key_hex());
}

#[test]
fn test_status_reports_env_source() {
    let t = Test::init("shop");

    let output = t
        .cmd()
        .env("NVOI_MASTER_KEY", TEST_KEY)
        .arg("status")
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "$NVOI_MASTER_KEY");
}

#[test]
fn test_status_flag_beats_env() {
    let t = Test::init("shop");
    std::fs::write(t.path("other.key"), OTHER_KEY).unwrap();

    let output = t
        .cmd()
        .env("NVOI_MASTER_KEY", TEST_KEY)
        .args(["--master-key", "other.key", "status"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "--master-key");
    assert_stdout_contains(&output, "other.key");
}

#[test]
fn test_status_finds_nested_credentials() {
    let t = Test::new();
    std::fs::create_dir(t.path("config")).unwrap();

    let output = t
        .cmd()
        .args(["--credentials", "config/deploy.enc", "init", "--name", "shop"])
        .output()
        .unwrap();
    assert_success(&output);

    // no flag: discovered by search order
    let output = t.status();
    assert_success(&output);
    assert_stdout_contains(&output, "config/deploy.enc");
    assert_stdout_contains(&output, "yes");
}

//! Tests for `nvoi credentials show|set|edit`.

use crate::support::*;

#[test]
fn test_show_prints_yaml() {
    let t = Test::with_config(MINIMAL_CONFIG);

    let output = t.show();
    assert_success(&output);
    assert_eq!(stdout(&output), MINIMAL_CONFIG);
}

#[test]
fn test_show_without_key_fails() {
    let t = Test::init("shop");
    std::fs::remove_file(t.path("deploy.key")).unwrap();

    let output = t.show();
    assert_failure(&output);
    assert_stderr_contains(&output, "master key not found");
    assert_stderr_contains(&output, "NVOI_MASTER_KEY");
}

#[test]
fn test_show_with_wrong_env_key_fails() {
    let t = Test::init("shop");

    let output = t
        .cmd()
        .env("NVOI_MASTER_KEY", OTHER_KEY)
        .args(["credentials", "show"])
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "decryption failed");
}

#[test]
fn test_show_with_malformed_env_key_fails() {
    let t = Test::init("shop");

    let output = t
        .cmd()
        .env("NVOI_MASTER_KEY", "not-hex")
        .args(["credentials", "show"])
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid master key");
}

#[test]
fn test_set_creates_nested_value() {
    let t = Test::init("shop");

    let output = t.set("application.compute_provider.hetzner.api_token", "hz-123");
    assert_success(&output);
    assert_stdout_contains(&output, "set application.compute_provider.hetzner.api_token");

    assert!(t.plaintext().contains("api_token: hz-123"));
}

#[test]
fn test_set_warns_but_saves_incomplete_config() {
    let t = Test::init("shop");

    let output = t.set("application.name", "store");
    assert_success(&output);
    assert_stdout_contains(&output, "not yet valid");
    assert!(t.plaintext().contains("name: store"));
}

#[test]
fn test_set_on_valid_config_has_no_warning() {
    let t = Test::with_config(MINIMAL_CONFIG);

    let output = t.set("application.environment", "staging");
    assert_success(&output);
    assert_stdout_excludes(&output, "not yet valid");
}

#[test]
fn test_set_scalar_types() {
    let t = Test::with_config(MINIMAL_CONFIG);

    assert_success(&t.set("application.servers.master.count", "3"));
    let store = t.store();
    let config = nvoi::core::config::Configuration::parse(&store.read().unwrap()).unwrap();
    assert_eq!(config.application().servers["master"].count, 3);
}

#[test]
fn test_set_conflict_leaves_file_untouched() {
    let t = Test::with_config(MINIMAL_CONFIG);
    let before = std::fs::read(t.path("deploy.enc")).unwrap();

    let output = t.set("application.name.first", "x");
    assert_failure(&output);
    assert_stderr_contains(&output, "is not a mapping");

    let after = std::fs::read(t.path("deploy.enc")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_set_rejects_empty_segment() {
    let t = Test::init("shop");

    let output = t.set("application..name", "x");
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid key path");
}

#[cfg(unix)]
#[test]
fn test_edit_with_unchanged_file_saves_nothing() {
    let t = Test::with_config(MINIMAL_CONFIG);
    let before = std::fs::read(t.path("deploy.enc")).unwrap();

    let output = t
        .cmd()
        .env("VISUAL", "true")
        .env("EDITOR", "true")
        .args(["credentials", "edit"])
        .output()
        .unwrap();
    assert_success(&output);

    let after = std::fs::read(t.path("deploy.enc")).unwrap();
    assert_eq!(before, after);
}

#[cfg(unix)]
#[test]
fn test_edit_saves_valid_change() {
    use std::os::unix::fs::PermissionsExt;

    let t = Test::with_config(MINIMAL_CONFIG);
    let editor = t.path("editor.sh");
    std::fs::write(
        &editor,
        "#!/bin/sh\nsleep 1\nsed 's/name: myapp/name: renamed/' \"$1\" > \"$1.new\" && mv \"$1.new\" \"$1\"\n",
    )
    .unwrap();
    std::fs::set_permissions(&editor, std::fs::Permissions::from_mode(0o755)).unwrap();

    let output = t
        .cmd()
        .env("VISUAL", &editor)
        .env("EDITOR", &editor)
        .args(["credentials", "edit"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "saved");

    assert!(t.plaintext().contains("name: renamed"));
}

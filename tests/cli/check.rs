//! Tests for `nvoi check`.

use crate::support::*;

#[test]
fn test_check_valid_config() {
    let t = Test::with_config(FULL_CONFIG);

    let output = t.check();
    assert_success(&output);
    assert_stdout_contains(&output, "configuration valid");
    assert_stdout_contains(&output, "hetzner");
    assert_stdout_contains(&output, "web → app.example.com");
    assert_stdout_contains(&output, "workers x2");
}

#[test]
fn test_check_never_prints_secrets() {
    let t = Test::with_config(FULL_CONFIG);

    for output in [t.check(), t.check_json()] {
        assert_success(&output);
        assert_stdout_excludes(&output, "s3cret");
        assert_stdout_excludes(&output, "hz-token");
    }
}

#[test]
fn test_check_template_fails_on_first_rule() {
    let t = Test::init("shop");

    let output = t.check();
    assert_failure(&output);
    assert_stderr_contains(
        &output,
        "invalid configuration: domain_provider.cloudflare.api_token is required",
    );
}

#[test]
fn test_check_dangling_reference() {
    let t = Test::with_config(DANGLING_CONFIG);

    let output = t.check();
    assert_failure(&output);
    assert_stderr_contains(&output, "app.web references undefined server 'nonexistent'");
}

#[test]
fn test_check_json_valid() {
    let t = Test::with_config(FULL_CONFIG);

    let output = t.check_json();
    assert_success(&output);

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["valid"], true);
    assert_eq!(json["application"], "shop");
    assert_eq!(json["environment"], "staging");
    assert_eq!(json["provider"], "hetzner");
    assert_eq!(json["database"], "postgres");
    assert_eq!(json["services"], serde_json::json!(["redis"]));
}

#[test]
fn test_check_json_invalid() {
    let t = Test::with_config(DANGLING_CONFIG);

    let output = t.check_json();
    assert_failure(&output);

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["valid"], false);
    assert!(json["error"].as_str().unwrap().contains("nonexistent"));
    assert_stderr_contains(&output, "nvoi credentials edit");
}

#[test]
fn test_check_json_malformed_yaml() {
    let t = Test::with_config("application: [unclosed\n");

    let output = t.check_json();
    assert_failure(&output);

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["valid"], false);
    assert!(json["error"].as_str().unwrap().contains("invalid YAML"));
}

#[test]
fn test_check_json_non_mapping_root() {
    let t = Test::with_config("- a\n- b\n");

    let output = t.check_json();
    assert_failure(&output);

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["valid"], false);
    assert!(json["error"].as_str().unwrap().contains("mapping"));
}

#[test]
fn test_check_branch_does_not_hide_missing_name() {
    let t = Test::with_config(&FULL_CONFIG.replace("name: shop", "name: \"\""));

    let output = t
        .cmd()
        .args(["check", "--branch", "feat"])
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "application.name is required");
}

#[test]
fn test_check_with_branch() {
    let t = Test::with_config(FULL_CONFIG);

    let output = t
        .cmd()
        .args(["check", "--json", "--branch", "Feature/Cart"])
        .output()
        .unwrap();
    assert_success(&output);

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["application"], "feature-cart-shop");
    let hosts: Vec<&str> = json["app"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|a| a["hostname"].as_str())
        .collect();
    assert!(hosts.contains(&"feature-cart-app.example.com"));
    assert!(hosts.contains(&"feature-cart-api.example.com"));
}

#[test]
fn test_check_malformed_yaml() {
    let t = Test::with_config("application: [unclosed\n");

    let output = t.check();
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid YAML");
}

#[test]
fn test_check_uninitialized() {
    let t = Test::new();
    std::fs::write(t.path("deploy.key"), TEST_KEY).unwrap();

    let output = t.check();
    assert_failure(&output);
    assert_stderr_contains(&output, "credentials not found");
    assert_stdout_contains(&output, "nvoi init");
}

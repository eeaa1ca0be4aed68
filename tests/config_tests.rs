//! Configuration and rules loading tests

use pathgate::access_control::{PathValidator, SharedWhitelist, StaticWhitelist};
use pathgate::config::{
    LogFormat, RulesFormat, UnmatchedPolicy, load_config, load_config_from_str,
    load_path_validator, load_rules, load_rules_from_reader,
};
use pathgate::error::ConfigError;
use std::env;
use std::fs;
use std::io::{self, Read};
use tempfile::tempdir;

const FULL_CONFIG: &str = r#"
rules = "/srv/pathgate/groups.json"

[whitelist]
usernames = ["admin@example.com", "ops@example.com"]

[policy]
unmatched = "allow"

[logging]
level = "pathgate=debug,info"
format = "json"
"#;

const RULES_JSON: &str = r#"
{"groups": [
    {"name": "sample1", "paths": ["/a"], "usernames": ["user@sample.com", "user2@sample.com"]},
    {"name": "sample2", "paths": ["/b"], "usernames": ["user@sample.com"]}
]}
"#;

const RULES_TOML: &str = r#"
[[groups]]
name = "sample1"
paths = ["/a"]
usernames = ["user@sample.com", "user2@sample.com"]

[[groups]]
name = "sample2"
paths = ["/b"]
usernames = ["user@sample.com"]
"#;

#[test]
fn test_full_config() {
    let config = load_config_from_str(FULL_CONFIG).unwrap();

    assert_eq!(config.rules.as_deref(), Some("/srv/pathgate/groups.json"));
    assert_eq!(
        config.whitelist.usernames,
        vec!["admin@example.com", "ops@example.com"]
    );
    assert_eq!(config.policy.unmatched, UnmatchedPolicy::Allow);
    assert_eq!(config.logging.level, "pathgate=debug,info");
    assert_eq!(config.logging.format, LogFormat::Json);
}

#[test]
fn test_config_defaults() {
    let config = load_config_from_str("").unwrap();

    assert!(config.rules.is_none());
    assert!(config.whitelist.usernames.is_empty());
    assert_eq!(config.policy.unmatched, UnmatchedPolicy::Deny);
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.format, LogFormat::Pretty);
}

#[test]
fn test_invalid_policy_value() {
    let result = load_config_from_str("[policy]\nunmatched = \"sometimes\"\n");
    assert!(matches!(result.unwrap_err(), ConfigError::Load(_)));
}

#[test]
fn test_explicit_config_path_must_exist() {
    let result = load_config(Some("/nonexistent/pathgate.toml"));
    assert!(matches!(result.unwrap_err(), ConfigError::Load(_)));
}

#[test]
fn test_load_rules_json_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("groups.json");
    fs::write(&path, RULES_JSON).unwrap();

    let rules = load_rules(path.to_str().unwrap()).unwrap();
    assert_eq!(rules.groups.len(), 2);
    assert_eq!(rules.groups[0].name, "sample1");
    assert_eq!(rules.groups[1].usernames, vec!["user@sample.com"]);
}

#[test]
fn test_load_rules_toml_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("groups.toml");
    fs::write(&path, RULES_TOML).unwrap();

    let rules = load_rules(path.to_str().unwrap()).unwrap();
    assert_eq!(rules.groups.len(), 2);
    assert_eq!(rules.groups[1].paths, vec!["/b"]);
}

#[test]
fn test_load_rules_missing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing.json");

    let err = load_rules(path.to_str().unwrap()).unwrap_err();
    match err {
        ConfigError::Read { source_name, .. } => {
            assert!(source_name.ends_with("missing.json"))
        }
        other => panic!("expected Read error, got {other}"),
    }
}

#[test]
fn test_load_rules_malformed_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("groups.json");
    fs::write(&path, "{\"groups\": [").unwrap();

    let err = load_rules(path.to_str().unwrap()).unwrap_err();
    assert!(matches!(err, ConfigError::Decode { .. }));
    assert!(err.to_string().contains("groups.json"));
}

struct FailingReader;

impl Read for FailingReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::other("disk on fire"))
    }
}

#[test]
fn test_reader_failure_is_read_error() {
    let err = load_rules_from_reader(FailingReader, RulesFormat::Json, "<broken>").unwrap_err();
    assert!(err.is_source_read());
    assert!(err.to_string().contains("<broken>"));
}

#[test]
fn test_load_path_validator_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("groups.json");
    fs::write(&path, RULES_JSON).unwrap();

    let whitelist = SharedWhitelist::new(StaticWhitelist::new(["admin@example.com"]));
    let pv = load_path_validator(path.to_str(), whitelist).unwrap();

    assert_eq!(pv.len(), 2);
    assert!(pv.is_valid("user@sample.com", "/b/b/c"));
    assert!(!pv.is_valid("user2@sample.com", "/b/b/c"));
    assert!(pv.is_valid("admin@example.com", "/b/b/c"));
}

#[test]
fn test_load_path_validator_bad_pattern_in_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("groups.json");
    fs::write(
        &path,
        r#"{"groups": [{"name": "g", "paths": ["/ok", "/bad("], "usernames": ["u"]}]}"#,
    )
    .unwrap();

    let err = load_path_validator(path.to_str(), SharedWhitelist::none()).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidPattern { .. }));
    assert!(err.to_string().contains("/bad("));
}

#[test]
fn test_load_path_validator_missing_file() {
    let err = load_path_validator(Some("/nonexistent/groups.json"), SharedWhitelist::none())
        .unwrap_err();
    assert!(err.is_source_read());
}

#[test]
#[serial_test::serial]
fn test_env_overrides_file() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("pathgate.toml");
    fs::write(
        &config_path,
        r#"
rules = "/from/file.json"

[policy]
unmatched = "deny"
"#,
    )
    .unwrap();

    unsafe {
        env::set_var("PATHGATE__POLICY__UNMATCHED", "allow");
        env::set_var(
            "PATHGATE__WHITELIST__USERNAMES",
            "admin@example.com,ops@example.com",
        );
    }

    let config = load_config(Some(config_path.to_str().unwrap()));

    unsafe {
        env::remove_var("PATHGATE__POLICY__UNMATCHED");
        env::remove_var("PATHGATE__WHITELIST__USERNAMES");
    }

    let config = config.unwrap();
    assert_eq!(config.rules.as_deref(), Some("/from/file.json"));
    assert_eq!(config.policy.unmatched, UnmatchedPolicy::Allow);
    assert_eq!(
        config.whitelist.usernames,
        vec!["admin@example.com", "ops@example.com"]
    );
}

#[test]
#[serial_test::serial]
fn test_env_sets_rules_path() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("pathgate.toml");
    fs::write(&config_path, "").unwrap();

    unsafe {
        env::set_var("PATHGATE__RULES", "/from/env.json");
    }

    let config = load_config(Some(config_path.to_str().unwrap()));

    unsafe {
        env::remove_var("PATHGATE__RULES");
    }

    assert_eq!(config.unwrap().rules.as_deref(), Some("/from/env.json"));
}

use bugdesk::config::{load_settings, ConfigError, Settings, SubmissionBackend};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn explicit_config_file_is_loaded_and_validated() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("bugdesk.yaml");
    fs::write(
        &path,
        format!(
            r#"
state_root: {}
reporter_id: jane@example.com
page_url: https://qa.example.com/checkout
user_agent: "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)"
submission:
  backend: http
  endpoint: https://bugs.example.com/api/reports
  token_env: BUGDESK_TEST_UNUSED_TOKEN
  timeout_seconds: 12
"#,
            dir.path().display()
        ),
    )
    .expect("write config");

    let settings = load_settings(Some(&path)).expect("load");
    assert_eq!(settings.submission.backend, SubmissionBackend::Http);
    assert_eq!(
        settings.submission.endpoint.as_deref(),
        Some("https://bugs.example.com/api/reports")
    );
    assert_eq!(settings.submission_timeout(), Duration::from_secs(12));
    assert_eq!(settings.page_url, "https://qa.example.com/checkout");
    assert_eq!(settings.resolve_reporter().as_str(), "jane@example.com");
    assert_eq!(
        settings.resolve_state_root().expect("state root"),
        dir.path().to_path_buf()
    );
}

#[test]
fn missing_explicit_config_file_is_a_read_error() {
    let dir = tempdir().expect("tempdir");
    let err = load_settings(Some(&dir.path().join("absent.yaml"))).expect_err("missing");
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn malformed_yaml_is_a_parse_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("bugdesk.yaml");
    fs::write(&path, "submission: [not, a, map").expect("write");
    let err = load_settings(Some(&path)).expect_err("malformed");
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn invalid_settings_fail_validation_on_load() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("bugdesk.yaml");
    fs::write(&path, "state_root: relative/dir\n").expect("write");
    let err = load_settings(Some(&path)).expect_err("relative root");
    assert!(err.to_string().contains("`state_root` must be an absolute path"));
}

#[test]
fn unset_token_env_is_reported_by_name() {
    let settings: Settings = serde_yaml::from_str(
        r#"
submission:
  backend: http
  endpoint: http://127.0.0.1:9/bugs
  token_env: BUGDESK_TEST_TOKEN_THAT_IS_NEVER_SET
"#,
    )
    .expect("parse");
    let err = settings.resolve_bearer_token().expect_err("unset token");
    assert!(err
        .to_string()
        .contains("BUGDESK_TEST_TOKEN_THAT_IS_NEVER_SET"));
}

#[test]
fn outbox_defaults_under_state_root() {
    let settings: Settings = serde_yaml::from_str("state_root: /srv/bugdesk").expect("parse");
    assert_eq!(settings.submission.backend, SubmissionBackend::Outbox);
    assert_eq!(
        settings.resolve_outbox_path().expect("outbox"),
        PathBuf::from("/srv/bugdesk/outbox")
    );
}

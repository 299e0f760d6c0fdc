use laneboard::config::Config;
use laneboard::constants::{DEFAULT_API_BASE_URL, DEFAULT_API_TOKEN_ENV, REQUEST_TIMEOUT_DEFAULT_SECS};

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.api.base_url, DEFAULT_API_BASE_URL);
    assert_eq!(config.api.token_env, DEFAULT_API_TOKEN_ENV);
    assert_eq!(config.sync.request_timeout_seconds, REQUEST_TIMEOUT_DEFAULT_SECS);
    assert!(!config.logging.enabled);
    assert!(config.logging.file.is_none());
}

#[test]
fn test_config_validation() {
    let mut config = Config::default();

    // Valid config should pass
    assert!(config.validate().is_ok());

    // Base URL must be an HTTP(S) URL
    config.api.base_url = "ftp://example.com".to_string();
    assert!(config.validate().is_err());
    config.api.base_url = String::new();
    assert!(config.validate().is_err());

    // Reset and test invalid timeout
    config.api.base_url = "https://api.example.com".to_string();
    config.sync.request_timeout_seconds = 0;
    assert!(config.validate().is_err());
    config.sync.request_timeout_seconds = 900;
    assert!(config.validate().is_err());
}

#[test]
fn test_config_serialization() {
    let config = Config::default();
    let toml_str = toml::to_string_pretty(&config).unwrap();
    assert!(toml_str.contains("base_url = \"http://localhost:8000\""));
    assert!(toml_str.contains("request_timeout_seconds = 30"));
}

#[test]
fn test_partial_config_deserialization() {
    // Partial TOML configs merge with defaults
    let partial_toml = r#"
[api]
base_url = "https://pm.example.com"

[logging]
enabled = true
"#;

    let config: Config = toml::from_str(partial_toml).unwrap();

    // Check that specified values are used
    assert_eq!(config.api.base_url, "https://pm.example.com");
    assert!(config.logging.enabled);

    // Check that unspecified values use defaults
    assert_eq!(config.api.token_env, DEFAULT_API_TOKEN_ENV);
    assert_eq!(config.sync.request_timeout_seconds, REQUEST_TIMEOUT_DEFAULT_SECS);
}

#[test]
fn test_generate_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    Config::generate_default_config(&path).unwrap();
    let loaded = Config::load_from_file(&path).unwrap();

    assert_eq!(loaded.api.base_url, DEFAULT_API_BASE_URL);
    assert_eq!(loaded.sync.request_timeout_seconds, REQUEST_TIMEOUT_DEFAULT_SECS);

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("# Laneboard Configuration File"));
}

#[test]
fn test_load_from_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.toml");
    assert!(Config::load_from_file(&path).is_err());
}

#[test]
fn test_load_rejects_invalid_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[sync]\nrequest_timeout_seconds = 0\n").unwrap();
    assert!(Config::load_from_file(&path).is_err());
}

//! Unit tests for config module

use docview::config::StorageBackend;
use docview::Config;

#[test]
fn default_config_has_expected_values() {
    let config = Config::default();
    assert_eq!(config.cache.max_size, 20);
    assert_eq!(config.cache.fetch_workers, 4);
    assert!(!config.viewer.toolbar);
    assert!(!config.viewer.navpanes);
    assert!(config.viewer.extra.is_none());
    assert_eq!(config.storage.backend, StorageBackend::Memory);
    assert_eq!(config.storage.spool_directory, "~/.cache/docview/spool");
    assert_eq!(config.storage.quota_mb, 256);
    assert_eq!(config.storage.max_document_mb, 50);
    assert!(config.validate().is_ok());
}

#[test]
fn config_serialization_roundtrip() {
    let config = Config::default();
    let toml_str = toml::to_string(&config).unwrap();
    let parsed: Config = toml::from_str(&toml_str).unwrap();
    assert_eq!(parsed.cache.max_size, config.cache.max_size);
    assert_eq!(parsed.storage.backend, config.storage.backend);
    assert_eq!(parsed.viewer.fragment(), config.viewer.fragment());
}

#[test]
fn empty_file_uses_defaults() {
    let config: Config = toml::from_str("").unwrap();
    assert_eq!(config.cache.max_size, 20);
}

#[test]
fn partial_sections_keep_other_defaults() {
    let toml_str = r#"
[cache]
max_size = 8
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.cache.max_size, 8);
    assert_eq!(config.cache.fetch_workers, 4);
    assert_eq!(config.storage.quota_mb, 256);
}

#[test]
fn storage_backend_parses_lowercase() {
    let toml_str = r#"
[storage]
backend = "spool"
spool_directory = "/tmp/docview"
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.storage.backend, StorageBackend::Spool);
    assert_eq!(config.spool_directory().to_string_lossy(), "/tmp/docview");
}

#[test]
fn unknown_backend_is_rejected() {
    let toml_str = r#"
[storage]
backend = "s3"
"#;
    assert!(toml::from_str::<Config>(toml_str).is_err());
}

#[test]
fn viewer_fragment_defaults_hide_chrome() {
    assert_eq!(Config::default().viewer.fragment(), "toolbar=0&navpanes=0");
}

#[test]
fn viewer_fragment_reflects_settings() {
    let toml_str = r##"
[viewer]
toolbar = true
extra = "#zoom=page-width"
"##;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.viewer.fragment(), "toolbar=1&navpanes=0&zoom=page-width");
}

#[test]
fn validate_rejects_zero_workers() {
    let mut config = Config::default();
    config.cache.fetch_workers = 0;
    assert_eq!(
        config.validate().unwrap_err(),
        "cache.fetch_workers must be > 0"
    );
}

#[test]
fn validate_rejects_too_many_workers() {
    let mut config = Config::default();
    config.cache.fetch_workers = 64;
    assert!(config.validate().unwrap_err().contains("exceeds maximum"));
}

#[test]
fn validate_rejects_document_limit_above_quota() {
    let mut config = Config::default();
    config.storage.quota_mb = 10;
    config.storage.max_document_mb = 20;
    assert!(config.validate().unwrap_err().contains("storage.quota_mb"));
}

#[test]
fn spool_directory_expands_home() {
    let config = Config::default();
    let dir = config.spool_directory();
    if let Some(home) = dirs::home_dir() {
        assert_eq!(dir, home.join(".cache/docview/spool"));
    }
}

//! Integration tests for configuration and logging setup

use inline_editor::config::{Config, ConfigManager, CONFIG_FILE_NAME};
use inline_editor::logging::{init_logging, LOG_FILE_NAME};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_missing_file_keeps_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let mut config_manager = ConfigManager::new(temp_dir.path());

    config_manager.load().unwrap();

    let config = config_manager.get_config();
    assert!(config.editor.synthesize_key_up);
    assert!(config.editor.close_on_commit);
    assert!(config.ui.show_status_bar);
    assert!(config.ui.show_toasts);
    assert_eq!(config.ui.toast_duration_ms, 3000);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_save_and_reload() {
    let temp_dir = TempDir::new().unwrap();
    let nested = temp_dir.path().join("inline-edit");

    let mut config_manager = ConfigManager::new(&nested);
    config_manager.get_config_mut().editor.close_on_commit = false;
    config_manager.get_config_mut().ui.toast_duration_ms = 500;
    config_manager.save().unwrap();
    assert!(nested.join(CONFIG_FILE_NAME).exists());

    let mut reloaded = ConfigManager::new(&nested);
    reloaded.load().unwrap();
    assert_eq!(reloaded.get_config(), config_manager.get_config());
}

#[test]
fn test_partial_file_fills_in_defaults() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join(CONFIG_FILE_NAME),
        r#"{ "editor": { "synthesize_key_up": false } }"#,
    )
    .unwrap();

    let mut config_manager = ConfigManager::new(temp_dir.path());
    config_manager.load().unwrap();

    let config = config_manager.into_config();
    assert!(!config.editor.synthesize_key_up);
    assert!(config.editor.close_on_commit);
    assert_eq!(config.ui, Config::default().ui);
}

#[test]
fn test_invalid_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(CONFIG_FILE_NAME), "{ not json").unwrap();

    let mut config_manager = ConfigManager::new(temp_dir.path());
    let err = config_manager.load().unwrap_err();
    assert!(err.to_string().contains("Failed to parse config"));
    // Defaults survive a failed load
    assert_eq!(config_manager.get_config(), &Config::default());
}

#[test]
fn test_update_and_get_setting() {
    let temp_dir = TempDir::new().unwrap();
    let mut config_manager = ConfigManager::new(temp_dir.path());

    config_manager
        .update_setting("editor.synthesizeKeyUp", json!(false))
        .unwrap();
    config_manager
        .update_setting("ui.toastDurationMs", json!(1200))
        .unwrap();
    config_manager
        .update_setting("logging.level", json!("debug"))
        .unwrap();

    assert_eq!(
        config_manager.get_setting("editor.synthesizeKeyUp").unwrap(),
        json!(false)
    );
    assert_eq!(
        config_manager.get_setting("ui.toastDurationMs").unwrap(),
        json!(1200)
    );
    assert_eq!(
        config_manager.get_setting("logging.level").unwrap(),
        json!("debug")
    );
}

#[test]
fn test_setting_errors() {
    let temp_dir = TempDir::new().unwrap();
    let mut config_manager = ConfigManager::new(temp_dir.path());

    assert!(config_manager
        .update_setting("ui.showToasts", json!("yes"))
        .is_err());
    assert!(config_manager
        .update_setting("editor.unknown", json!(true))
        .is_err());
    assert!(config_manager.get_setting("nope").is_err());
    assert!(config_manager.get_config().ui.show_toasts);
}

#[test]
fn test_init_logging_creates_log_file() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::default();

    let path = init_logging(&config.logging, temp_dir.path()).unwrap();
    assert_eq!(path, temp_dir.path().join(LOG_FILE_NAME));
    assert!(path.exists());

    // A second call keeps the first subscriber and still succeeds
    assert!(init_logging(&config.logging, temp_dir.path()).is_ok());
}

#[test]
fn test_init_logging_fails_for_missing_directory() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("does").join("not").join("exist");

    assert!(init_logging(&Config::default().logging, &missing).is_err());
}

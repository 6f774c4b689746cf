use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub editor: EditorConfig,

    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Behaviour of the mounted inline editor
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EditorConfig {
    /// Follow every key press with a key-up, for terminals that never report releases
    #[serde(default = "default_synthesize_key_up")]
    pub synthesize_key_up: bool,

    /// Unmount the editor once a committed value arrives
    #[serde(default = "default_close_on_commit")]
    pub close_on_commit: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct UiConfig {
    #[serde(default = "default_show_status_bar")]
    pub show_status_bar: bool,

    #[serde(default = "default_show_toasts")]
    pub show_toasts: bool,

    /// How long a toast stays up, in milliseconds
    #[serde(default = "default_toast_duration_ms")]
    pub toast_duration_ms: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_synthesize_key_up() -> bool {
    true
}
fn default_close_on_commit() -> bool {
    true
}
fn default_show_status_bar() -> bool {
    true
}
fn default_show_toasts() -> bool {
    true
}
fn default_toast_duration_ms() -> u64 {
    3000
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            synthesize_key_up: default_synthesize_key_up(),
            close_on_commit: default_close_on_commit(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_status_bar: default_show_status_bar(),
            show_toasts: default_show_toasts(),
            toast_duration_ms: default_toast_duration_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Loads and saves `config.json` inside the user directory
pub struct ConfigManager {
    config: Config,
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(config_dir: &Path) -> Self {
        Self {
            config: Config::default(),
            config_path: config_dir.join(CONFIG_FILE_NAME),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Read the config file if present; a missing file keeps the defaults
    pub fn load(&mut self) -> Result<()> {
        if !self.config_path.exists() {
            return Ok(());
        }

        let config_str = fs::read_to_string(&self.config_path)
            .with_context(|| format!("Failed to read {}", self.config_path.display()))?;
        self.config = serde_json::from_str(&config_str)
            .map_err(|e| anyhow!("Failed to parse config: {}", e))?;

        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let config_str = serde_json::to_string_pretty(&self.config)?;
        fs::write(&self.config_path, config_str)?;
        Ok(())
    }

    pub fn get_config(&self) -> &Config {
        &self.config
    }

    pub fn get_config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn into_config(self) -> Config {
        self.config
    }

    pub fn update_setting(&mut self, path: &str, value: serde_json::Value) -> Result<()> {
        match path {
            "editor.synthesizeKeyUp" => {
                self.config.editor.synthesize_key_up =
                    value.as_bool().ok_or_else(|| anyhow!("Expected boolean"))?;
            }
            "editor.closeOnCommit" => {
                self.config.editor.close_on_commit =
                    value.as_bool().ok_or_else(|| anyhow!("Expected boolean"))?;
            }
            "ui.showStatusBar" => {
                self.config.ui.show_status_bar =
                    value.as_bool().ok_or_else(|| anyhow!("Expected boolean"))?;
            }
            "ui.showToasts" => {
                self.config.ui.show_toasts =
                    value.as_bool().ok_or_else(|| anyhow!("Expected boolean"))?;
            }
            "ui.toastDurationMs" => {
                self.config.ui.toast_duration_ms =
                    value.as_u64().ok_or_else(|| anyhow!("Expected number"))?;
            }
            "logging.level" => {
                self.config.logging.level = value
                    .as_str()
                    .ok_or_else(|| anyhow!("Expected string"))?
                    .to_string();
            }
            _ => return Err(anyhow!("Unsupported setting path: {}", path)),
        }

        Ok(())
    }

    pub fn get_setting(&self, path: &str) -> Result<serde_json::Value> {
        match path {
            "editor.synthesizeKeyUp" => Ok(serde_json::json!(self.config.editor.synthesize_key_up)),
            "editor.closeOnCommit" => Ok(serde_json::json!(self.config.editor.close_on_commit)),
            "ui.showStatusBar" => Ok(serde_json::json!(self.config.ui.show_status_bar)),
            "ui.showToasts" => Ok(serde_json::json!(self.config.ui.show_toasts)),
            "ui.toastDurationMs" => Ok(serde_json::json!(self.config.ui.toast_duration_ms)),
            "logging.level" => Ok(serde_json::json!(self.config.logging.level)),
            _ => Err(anyhow!("Unsupported setting path: {}", path)),
        }
    }
}

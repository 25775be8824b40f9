use std::path::PathBuf;

use crate::core::config::data::Config;
use crate::core::constants::{DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_TRANSCRIPT_FILE};

/// Keys accepted by `palaver set` / `palaver unset`.
pub const CONFIG_KEYS: [&str; 5] = ["endpoint", "model", "transcript", "mouse", "log-file"];

/// Fully resolved runtime settings, injected into the controller at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSettings {
    pub endpoint: String,
    pub model: String,
    pub transcript_path: PathBuf,
    pub mouse_enabled: bool,
    pub log_file: Option<PathBuf>,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Config::default().resolve(SettingsOverrides::default())
    }
}

/// Values supplied on the command line; these win over the config file.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub endpoint: Option<String>,
    pub model: Option<String>,
    pub transcript: Option<PathBuf>,
    pub mouse: bool,
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn resolve(&self, overrides: SettingsOverrides) -> ChatSettings {
        ChatSettings {
            endpoint: overrides
                .endpoint
                .or_else(|| self.endpoint.clone())
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            model: overrides
                .model
                .or_else(|| self.model.clone())
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            transcript_path: overrides
                .transcript
                .or_else(|| self.transcript.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TRANSCRIPT_FILE)),
            mouse_enabled: overrides.mouse || self.mouse.unwrap_or(false),
            log_file: overrides.log_file.or_else(|| self.log_file.clone()),
        }
    }

    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), String> {
        let value = value.trim();
        if value.is_empty() {
            return Err(format!("A value is required for '{key}'"));
        }
        match key {
            "endpoint" => {
                if !(value.starts_with("http://") || value.starts_with("https://")) {
                    return Err(format!(
                        "Endpoint must be an http:// or https:// URL, got '{value}'"
                    ));
                }
                self.endpoint = Some(value.to_string());
            }
            "model" => self.model = Some(value.to_string()),
            "transcript" => self.transcript = Some(PathBuf::from(value)),
            "mouse" => self.mouse = Some(parse_toggle(value)?),
            "log-file" | "log_file" => self.log_file = Some(PathBuf::from(value)),
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }

    pub fn unset_value(&mut self, key: &str) -> Result<(), String> {
        match key {
            "endpoint" => self.endpoint = None,
            "model" => self.model = None,
            "transcript" => self.transcript = None,
            "mouse" => self.mouse = None,
            "log-file" | "log_file" => self.log_file = None,
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }
}

fn parse_toggle(value: &str) -> Result<bool, String> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        _ => Err(format!("Expected on/off, got '{value}'")),
    }
}

fn unknown_key(key: &str) -> String {
    format!(
        "Unknown config key: {key} (expected one of: {})",
        CONFIG_KEYS.join(", ")
    )
}

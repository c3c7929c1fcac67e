use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::Icons;
use crate::errors::{AppError, AppResult};

/// Directory under the home of the user running the Zabbix server
pub const CONFIG_DIR_NAME: &str = ".zabbix-hipcard";
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Upper bound for `timeout_secs` (one day)
pub const MAX_TIMEOUT_SECS: u64 = 86_400;

/// Optional settings file contents
///
/// ```toml
/// [hipchat]
/// server_url = "https://hipchat.internal.example.com"
/// timeout_secs = 10
///
/// [icons]
/// ok = "https://cdn.example.com/ok.png"
/// problem = "https://cdn.example.com/problem.png"
///
/// [logging]
/// level = "debug"
/// path = "/var/log/zabbix/hipcard.log"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub hipchat: HipChatSettings,
    pub icons: Icons,
    pub templates: TemplateSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HipChatSettings {
    /// Overrides `https://{tenant}.hipchat.com`, e.g. for HipChat Server
    pub server_url: Option<String>,
    pub timeout_secs: u64,
}

impl HipChatSettings {
    /// Timeouts outside `1..=MAX_TIMEOUT_SECS` are rejected
    pub fn validate(&self) -> AppResult<()> {
        if !(1..=MAX_TIMEOUT_SECS).contains(&self.timeout_secs) {
            return Err(AppError::config(format!(
                "hipchat.timeout_secs must be between 1 and {MAX_TIMEOUT_SECS}, got {}",
                self.timeout_secs
            )));
        }
        Ok(())
    }
}

impl Default for HipChatSettings {
    fn default() -> Self {
        Self {
            server_url: None,
            timeout_secs: 30,
        }
    }
}

/// Handlebars sources replacing the built-in message or description
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateSettings {
    pub message: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub path: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            path: None,
        }
    }
}

/// Loads [`Settings`] from disk
///
/// An explicitly requested file must exist. Without one, the manager looks at
/// `~/.zabbix-hipcard/config.toml` and falls back to defaults when that is
/// absent; the alert script never writes configuration itself.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: Option<PathBuf>,
    settings: Settings,
}

impl ConfigManager {
    pub fn new(explicit_path: Option<PathBuf>) -> AppResult<Self> {
        if let Some(path) = explicit_path {
            if !path.exists() {
                return Err(AppError::ConfigNotFound { path });
            }
            return Self::from_path(path);
        }

        match Self::default_config_path() {
            Some(path) if path.exists() => Self::from_path(path),
            _ => Ok(Self::with_settings(Settings::default())),
        }
    }

    pub fn from_path(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();
        let settings = Self::load(&path)?;
        Ok(Self {
            config_path: Some(path),
            settings,
        })
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            config_path: None,
            settings,
        }
    }

    pub fn default_config_path() -> Option<PathBuf> {
        BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    fn load(path: &Path) -> AppResult<Settings> {
        let content = fs::read_to_string(path)
            .map_err(|e| AppError::io_with_source(path, "read config file", e))?;
        let settings: Settings = toml::from_str(&content)?;

        settings.hipchat.validate()?;

        tracing::debug!(path = %path.display(), "loaded settings file");
        Ok(settings)
    }

    /// Path the settings were read from, if any
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

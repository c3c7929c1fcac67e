//! Configuration for one notification run
//!
//! [`NotifierConfig`] holds the values Zabbix passes on the command line.
//! [`Settings`] holds the optional TOML file with defaults that rarely
//! change between alerts (icons, timeouts, templates, logging).

pub mod notifier;
pub mod settings;

pub use notifier::{Icons, NotifierConfig};
pub use settings::{
    ConfigManager, HipChatSettings, LoggingSettings, Settings, TemplateSettings, MAX_TIMEOUT_SECS,
};

//! CLI context: settings and logging setup shared by the handler

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

use zabbix_hipcard::config::ConfigManager;

pub struct CliContext {
    pub verbose: bool,
    pub config_manager: ConfigManager,
}

impl CliContext {
    pub fn new(config_path: Option<PathBuf>, verbose: bool) -> Result<Self> {
        let config_manager = ConfigManager::new(config_path)?;
        Ok(Self {
            verbose,
            config_manager,
        })
    }

    /// Initialize logging based on verbosity and the `[logging]` settings.
    ///
    /// Zabbix discards the script's stderr, so a configured log path sends
    /// everything to that file instead.
    pub fn init_logging(&self) -> Result<()> {
        let logging = &self.config_manager.settings().logging;
        let log_level = if self.verbose { "debug" } else { logging.level.as_str() };

        let filter = EnvFilter::from_default_env().add_directive(
            log_level
                .parse()
                .unwrap_or_else(|_| tracing::Level::INFO.into()),
        );

        match &logging.path {
            Some(path) => {
                let file_name = path
                    .file_name()
                    .with_context(|| format!("Log path '{}' has no file name", path.display()))?;
                let directory = match path.parent() {
                    Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                    _ => PathBuf::from("."),
                };
                let appender = RollingFileAppender::builder()
                    .rotation(Rotation::NEVER)
                    .filename_prefix(file_name.to_string_lossy())
                    .build(&directory)
                    .with_context(|| format!("Failed to open log file '{}'", path.display()))?;

                tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_writer(appender)
                    .with_ansi(false)
                    .init();
            }
            None => {
                tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .init();
            }
        }

        if self.verbose {
            tracing::debug!("Verbose logging enabled");
            tracing::debug!("Settings file: {:?}", self.config_manager.config_path());
        }

        Ok(())
    }
}

//! Error types for the zabbix-hipcard alert script
//!
//! Every failure the adapter can hit surfaces through [`AppError`]. Nothing is
//! recovered locally: a malformed alert, a bad configuration value or a failed
//! HTTP call all propagate to the process and end the run.

use std::path::PathBuf;
use thiserror::Error;

use crate::alert::MessageDefect;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    // Alert message errors
    #[error("Malformed alert message: {reason}")]
    MalformedMessage { reason: MessageDefect },

    #[error("Unrecognized trigger status '{value}' (expected OK or PROBLEM)")]
    UnknownStatus { value: String },

    #[error("Unrecognized trigger severity '{value}'")]
    UnknownSeverity { value: String },

    // Configuration errors
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Missing required configuration value: {key}")]
    MissingConfigValue { key: String },

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("TOML parsing error: {context}")]
    TomlParsing {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // Template errors
    #[error("Template error: {message}")]
    Template {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // Network errors
    #[error("Failed to build HTTP client: {message}")]
    HttpClient {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Invalid notification endpoint '{url}'")]
    InvalidEndpoint {
        url: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Transport error while posting to room '{room_id}'")]
    Transport {
        room_id: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // Serialization and I/O errors
    #[error("JSON serialization error: {context}")]
    JsonSerialization {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("File I/O error for '{path}': {operation}")]
    Io {
        path: PathBuf,
        operation: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create a MalformedMessage error for the given defect
    pub fn malformed(reason: MessageDefect) -> Self {
        Self::MalformedMessage { reason }
    }

    /// Create a new Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    pub fn missing(key: impl Into<String>) -> Self {
        Self::MissingConfigValue { key: key.into() }
    }

    /// Create a new Template error with source
    pub fn template_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Template {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Wrap a failed request. The URL is stripped from the reqwest error so
    /// the auth token never ends up in logs or on stderr.
    pub fn transport(room_id: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Transport {
            room_id: room_id.into(),
            source: Some(Box::new(source.without_url())),
        }
    }

    /// Create a new I/O error with source
    pub fn io_with_source(
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Io {
            path: path.into(),
            operation: operation.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::MalformedMessage { .. } | Self::UnknownStatus { .. } | Self::UnknownSeverity { .. } => "message",
            Self::Configuration { .. } | Self::MissingConfigValue { .. } | Self::ConfigNotFound { .. } => "config",
            Self::TomlParsing { .. } | Self::JsonSerialization { .. } => "serialization",
            Self::Template { .. } => "template",
            Self::HttpClient { .. } | Self::InvalidEndpoint { .. } | Self::Transport { .. } => "network",
            Self::Io { .. } => "io",
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonSerialization {
            context: "failed to encode notification payload".to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        Self::TomlParsing {
            context: err.message().to_string(),
            source: Some(Box::new(err)),
        }
    }
}

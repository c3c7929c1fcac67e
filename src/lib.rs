//! Zabbix to HipChat card notifications
//!
//! Parses the eight-field `{ALERT.MESSAGE}` body produced by a Zabbix action,
//! styles it by trigger status and severity, and posts a collapsible card to
//! a HipChat v2 room.

pub mod alert;
pub mod config;
pub mod errors;
pub mod hipchat;
pub mod templates;

// Re-export commonly used types for convenience
pub use alert::{AlertFields, Severity, Status};
pub use config::{Icons, NotifierConfig, Settings};
pub use errors::{AppError, AppResult};
pub use hipchat::{HipChatClient, NotificationBuilder, NotificationPayload};

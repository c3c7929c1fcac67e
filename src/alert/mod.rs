//! Zabbix alert message handling
//!
//! The alert action in Zabbix renders `{ALERT.MESSAGE}` as eight
//! `key: "value"` lines. [`fields`] pulls those values out and [`styling`]
//! maps status and severity onto HipChat lozenges and colors.

pub mod fields;
pub mod styling;

pub use fields::{AlertFields, Field, MessageDefect};
pub use styling::{Color, Severity, Status, Styling};

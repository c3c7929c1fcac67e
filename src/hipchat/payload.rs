//! JSON body of `POST /v2/room/{room}/notification`
//!
//! Field order follows the declaration order below, so serializing the same
//! payload twice yields the same bytes.

use serde::Serialize;

use crate::alert::Color;
use crate::errors::AppResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationPayload {
    /// HipChat accepts the string form; kept as a string for compatibility
    /// with the payloads Zabbix installations already send.
    pub notify: &'static str,
    pub color: Color,
    pub message: String,
    pub card: Card,
    pub message_format: &'static str,
}

impl NotificationPayload {
    pub fn to_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub style: &'static str,
    pub format: &'static str,
    pub url: String,
    pub id: String,
    pub title: String,
    pub activity: Activity,
    pub description: Description,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Activity {
    pub html: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Description {
    pub format: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Icon {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub label: &'static str,
    pub value: AttributeValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeValue {
    pub label: String,
    pub style: &'static str,
}

impl Attribute {
    pub fn new(label: &'static str, value: impl Into<String>, style: &'static str) -> Self {
        Self {
            label,
            value: AttributeValue {
                label: value.into(),
                style,
            },
        }
    }
}

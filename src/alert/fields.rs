//! Field extraction from the `{ALERT.MESSAGE}` body
//!
//! The message must carry, in this exact order:
//!
//! ```text
//! name: "{TRIGGER.NAME}"
//! id: "{TRIGGER.ID}"
//! status: "{TRIGGER.STATUS}"
//! hostname: "{HOSTNAME}"
//! event_id: "{EVENT.ID}"
//! severity: "{TRIGGER.SEVERITY}"
//! url: "{TRIGGER.URL}"
//! description: "{TRIGGER.DESCRIPTION}"
//! ```
//!
//! Only the description may span lines. Values are taken verbatim; the one
//! exception is an empty `url`, which becomes `#` so the card link stays valid.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;

use crate::errors::{AppError, AppResult};

/// Placeholder link used when the trigger has no URL configured
pub const EMPTY_URL_PLACEHOLDER: &str = "#";

static ALERT_MESSAGE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r#"\Aname: *"(?P<name>.*?)"\s*"#,
        r#"id: *"(?P<id>.*?)"\s*"#,
        r#"status: *"(?P<status>.*?)"\s*"#,
        r#"hostname: *"(?P<hostname>.*?)"\s*"#,
        r#"event_id: *"(?P<event_id>.*?)"\s*"#,
        r#"severity: *"(?P<severity>.*?)"\s*"#,
        r#"url: *"(?P<url>.*?)"\s*"#,
        r#"description: *"(?P<description>(?s:.*))""#,
    ))
    .unwrap_or_else(|_| unreachable!())
});

/// The eight labels of an alert message, in their required order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    TriggerId,
    Status,
    Hostname,
    EventId,
    Severity,
    Url,
    Description,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::Name,
        Field::TriggerId,
        Field::Status,
        Field::Hostname,
        Field::EventId,
        Field::Severity,
        Field::Url,
        Field::Description,
    ];

    /// The literal label as it appears in the message
    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::TriggerId => "id",
            Field::Status => "status",
            Field::Hostname => "hostname",
            Field::EventId => "event_id",
            Field::Severity => "severity",
            Field::Url => "url",
            Field::Description => "description",
        }
    }

    fn is_multiline(self) -> bool {
        matches!(self, Field::Description)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Why a message could not be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageDefect {
    MissingField(Field),
    OutOfOrder { field: Field, after: Field },
    BadQuoting(Field),
    /// All labels are present, in order and quoted, but something else
    /// (leading text, stray characters between fields) breaks the layout.
    UnexpectedLayout,
}

impl fmt::Display for MessageDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageDefect::MissingField(field) => write!(f, "missing field '{field}'"),
            MessageDefect::OutOfOrder { field, after } => {
                write!(f, "field '{field}' must come after '{after}'")
            }
            MessageDefect::BadQuoting(field) => {
                write!(f, "value of field '{field}' is not enclosed in double quotes")
            }
            MessageDefect::UnexpectedLayout => {
                f.write_str("message does not follow the `key: \"value\"` layout")
            }
        }
    }
}

/// Values extracted from one alert message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertFields {
    pub name: String,
    pub trigger_id: String,
    pub status: String,
    pub hostname: String,
    pub event_id: String,
    pub severity: String,
    pub url: String,
    pub description: String,
}

impl AlertFields {
    /// Parse a rendered `{ALERT.MESSAGE}`.
    ///
    /// There is no partial result: either all eight fields are extracted or
    /// the call fails with [`AppError::MalformedMessage`] naming the first
    /// defect found.
    pub fn parse(message: &str) -> AppResult<Self> {
        let Some(caps) = ALERT_MESSAGE_REGEX.captures(message) else {
            let defect = diagnose(message);
            tracing::debug!(%defect, "alert message rejected");
            return Err(AppError::malformed(defect));
        };

        let group = |name: &str| {
            caps.name(name)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default()
        };

        let url = group("url");
        let url = if url.is_empty() {
            EMPTY_URL_PLACEHOLDER.to_string()
        } else {
            url
        };

        Ok(AlertFields {
            name: group("name"),
            trigger_id: group("id"),
            status: group("status"),
            hostname: group("hostname"),
            event_id: group("event_id"),
            severity: group("severity"),
            url,
            description: group("description"),
        })
    }
}

impl std::str::FromStr for AlertFields {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Work out which field broke the layout. Only called after the full match
/// failed, so it favours a precise answer over speed.
fn diagnose(message: &str) -> MessageDefect {
    let mut positions = Vec::with_capacity(Field::ALL.len());
    for field in Field::ALL {
        match find_label(message, field) {
            Some(pos) => positions.push((field, pos)),
            None => return MessageDefect::MissingField(field),
        }
    }

    for pair in positions.windows(2) {
        let (before, before_pos) = pair[0];
        let (field, pos) = pair[1];
        if pos < before_pos {
            return MessageDefect::OutOfOrder {
                field,
                after: before,
            };
        }
    }

    for (field, pos) in positions {
        if !is_quoted(&message[pos..], field) {
            return MessageDefect::BadQuoting(field);
        }
    }

    MessageDefect::UnexpectedLayout
}

/// First offset of `label:` that starts a line, or that follows a closing
/// quote plus whitespace. Labels quoted inside another value (`"bad id: x"`)
/// or embedded in a longer label (`event_id:`) are skipped.
fn find_label(message: &str, field: Field) -> Option<usize> {
    let needle = format!("{}:", field.label());
    message.match_indices(&needle).map(|(pos, _)| pos).find(|&pos| {
        let before = message[..pos].trim_end_matches([' ', '\t']);
        before.is_empty()
            || before.ends_with('\n')
            || (before.len() < pos && before.ends_with('"'))
    })
}

fn is_quoted(from_label: &str, field: Field) -> bool {
    let after_colon = &from_label[field.label().len() + 1..];
    let Some(value) = after_colon.trim_start_matches(' ').strip_prefix('"') else {
        return false;
    };
    if field.is_multiline() {
        value.contains('"')
    } else {
        value.lines().next().is_some_and(|line| line.contains('"'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_message() -> String {
        concat!(
            "name: \"Test Trigger Name\" \n",
            "id: \"1234567\" \n",
            "status: \"OK\" \n",
            "hostname: \"xyz.com\" \n",
            "event_id: \"987654321\" \n",
            "severity: \"Disaster\" \n",
            "url: \"url.xyz.com\" \n",
            "description: \"Test Trigger Description\"",
        )
        .to_string()
    }

    #[test]
    fn test_parse_extracts_all_fields_verbatim() {
        let fields = AlertFields::parse(&sample_message()).unwrap();

        assert_eq!(fields.name, "Test Trigger Name");
        assert_eq!(fields.trigger_id, "1234567");
        assert_eq!(fields.status, "OK");
        assert_eq!(fields.hostname, "xyz.com");
        assert_eq!(fields.event_id, "987654321");
        assert_eq!(fields.severity, "Disaster");
        assert_eq!(fields.url, "url.xyz.com");
        assert_eq!(fields.description, "Test Trigger Description");
    }

    #[test]
    fn test_values_are_not_trimmed() {
        let message = sample_message().replace("\"xyz.com\"", "\"  xyz.com \"");
        let fields = AlertFields::parse(&message).unwrap();
        assert_eq!(fields.hostname, "  xyz.com ");
    }

    #[test]
    fn test_empty_url_becomes_placeholder() {
        let message = sample_message().replace("\"url.xyz.com\"", "\"\"");
        let fields = AlertFields::parse(&message).unwrap();
        assert_eq!(fields.url, "#");
    }

    #[test]
    fn test_description_spans_lines() {
        let message = sample_message().replace(
            "\"Test Trigger Description\"",
            "\"Disk is full.\nCheck /var/log and \"rotate\" logs.\n\"",
        );
        let fields = AlertFields::parse(&message).unwrap();
        assert_eq!(
            fields.description,
            "Disk is full.\nCheck /var/log and \"rotate\" logs.\n"
        );
    }

    #[test]
    fn test_text_after_description_is_ignored() {
        let message = format!("{}\ntrailing junk", sample_message());
        let fields = AlertFields::parse(&message).unwrap();
        assert_eq!(fields.description, "Test Trigger Description");
    }

    #[test]
    fn test_fields_may_share_a_line() {
        let message = "name: \"a\" id: \"1\" status: \"PROBLEM\" hostname: \"h\" \
                       event_id: \"2\" severity: \"High\" url: \"\" description: \"d\"";
        let fields = AlertFields::parse(message).unwrap();
        assert_eq!(fields.name, "a");
        assert_eq!(fields.trigger_id, "1");
        assert_eq!(fields.status, "PROBLEM");
        assert_eq!(fields.url, "#");
    }

    #[test]
    fn test_missing_field_is_reported() {
        let message = sample_message().replace("severity: \"Disaster\" \n", "");
        let err = AlertFields::parse(&message).unwrap_err();
        match err {
            AppError::MalformedMessage { reason } => {
                assert_eq!(reason, MessageDefect::MissingField(Field::Severity));
            }
            other => panic!("Expected MalformedMessage, got {other:?}"),
        }
    }

    #[test]
    fn test_out_of_order_fields_are_rejected() {
        let message = concat!(
            "name: \"n\"\n",
            "status: \"OK\"\n",
            "id: \"1\"\n",
            "hostname: \"h\"\n",
            "event_id: \"2\"\n",
            "severity: \"High\"\n",
            "url: \"u\"\n",
            "description: \"d\"",
        );
        let err = AlertFields::parse(message).unwrap_err();
        match err {
            AppError::MalformedMessage { reason } => assert_eq!(
                reason,
                MessageDefect::OutOfOrder {
                    field: Field::Status,
                    after: Field::TriggerId,
                }
            ),
            other => panic!("Expected MalformedMessage, got {other:?}"),
        }
    }

    #[test]
    fn test_unquoted_value_is_rejected() {
        let message = sample_message().replace("\"1234567\"", "1234567");
        let err = AlertFields::parse(&message).unwrap_err();
        match err {
            AppError::MalformedMessage { reason } => {
                assert_eq!(reason, MessageDefect::BadQuoting(Field::TriggerId));
            }
            other => panic!("Expected MalformedMessage, got {other:?}"),
        }
    }

    #[test]
    fn test_leading_text_is_rejected() {
        let message = format!("Alert!\n{}", sample_message());
        let err = AlertFields::parse(&message).unwrap_err();
        match err {
            AppError::MalformedMessage { reason } => {
                assert_eq!(reason, MessageDefect::UnexpectedLayout);
            }
            other => panic!("Expected MalformedMessage, got {other:?}"),
        }
    }

    #[test]
    fn test_event_id_does_not_satisfy_id() {
        let message = sample_message().replace("id: \"1234567\" \n", "");
        let err = AlertFields::parse(&message).unwrap_err();
        assert!(matches!(
            err,
            AppError::MalformedMessage {
                reason: MessageDefect::MissingField(Field::TriggerId)
            }
        ));
    }

    #[test]
    fn test_label_inside_a_value_is_not_a_field() {
        let message = sample_message()
            .replace("\"Test Trigger Name\"", "\"bad id: x\"")
            .replace("id: \"1234567\" \n", "");
        let err = AlertFields::parse(&message).unwrap_err();
        assert!(matches!(
            err,
            AppError::MalformedMessage {
                reason: MessageDefect::MissingField(Field::TriggerId)
            }
        ));
    }

    #[test]
    fn test_from_str() {
        let fields: AlertFields = sample_message().parse().unwrap();
        assert_eq!(fields.event_id, "987654321");
    }
}

//! Status and severity styling tables
//!
//! HipChat renders AUI lozenges; each trigger status and severity maps onto
//! exactly one lozenge class. Unknown values are rejected rather than left
//! unstyled.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::AlertFields;
use crate::config::Icons;
use crate::errors::{AppError, AppResult};

/// Trigger status as reported by `{TRIGGER.STATUS}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Problem,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::Problem => "PROBLEM",
        }
    }

    /// Lozenge class for the status attribute and activity line
    pub fn badge(self) -> &'static str {
        match self {
            Status::Ok => "lozenge-success",
            Status::Problem => "lozenge-error",
        }
    }
}

impl FromStr for Status {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OK" => Ok(Status::Ok),
            "PROBLEM" => Ok(Status::Problem),
            other => Err(AppError::UnknownStatus {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trigger severity as reported by `{TRIGGER.SEVERITY}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    NotClassified,
    Information,
    Warning,
    Average,
    High,
    Disaster,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::NotClassified => "Not classified",
            Severity::Information => "Information",
            Severity::Warning => "Warning",
            Severity::Average => "Average",
            Severity::High => "High",
            Severity::Disaster => "Disaster",
        }
    }

    pub fn badge(self) -> &'static str {
        match self {
            Severity::NotClassified | Severity::Information => "lozenge",
            Severity::Warning | Severity::Average => "lozenge-current",
            Severity::High | Severity::Disaster => "lozenge-error",
        }
    }

    /// Message color before the status override is applied
    pub fn color(self) -> Color {
        match self {
            Severity::NotClassified | Severity::Information => Color::Gray,
            Severity::Warning | Severity::Average => Color::Yellow,
            Severity::High | Severity::Disaster => Color::Red,
        }
    }
}

impl FromStr for Severity {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Not classified" => Ok(Severity::NotClassified),
            "Information" => Ok(Severity::Information),
            "Warning" => Ok(Severity::Warning),
            "Average" => Ok(Severity::Average),
            "High" => Ok(Severity::High),
            "Disaster" => Ok(Severity::Disaster),
            other => Err(AppError::UnknownSeverity {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HipChat message background color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Gray,
    Yellow,
    Red,
    Green,
}

impl Color {
    pub fn as_str(self) -> &'static str {
        match self {
            Color::Gray => "gray",
            Color::Yellow => "yellow",
            Color::Red => "red",
            Color::Green => "green",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved presentation for one alert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Styling {
    pub status: Status,
    pub severity: Severity,
    pub status_badge: &'static str,
    pub severity_badge: &'static str,
    pub color: Color,
    pub icon: Option<String>,
}

impl Styling {
    pub fn resolve(fields: &AlertFields, icons: &Icons) -> AppResult<Self> {
        let status: Status = fields.status.parse()?;
        let severity: Severity = fields.severity.parse()?;

        // A recovered trigger is always green, whatever its severity.
        let color = match status {
            Status::Ok => Color::Green,
            Status::Problem => severity.color(),
        };

        Ok(Styling {
            status,
            severity,
            status_badge: status.badge(),
            severity_badge: severity.badge(),
            color,
            icon: icons.for_status(status).map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(status: &str, severity: &str) -> AlertFields {
        AlertFields {
            name: "Disk full".to_string(),
            trigger_id: "13502".to_string(),
            status: status.to_string(),
            hostname: "db01".to_string(),
            event_id: "4410".to_string(),
            severity: severity.to_string(),
            url: "#".to_string(),
            description: String::new(),
        }
    }

    fn icons() -> Icons {
        Icons {
            ok: Some("http://xyz.com/ok.png".to_string()),
            problem: Some("http://xyz.com/prob.png".to_string()),
        }
    }

    #[test]
    fn test_problem_styling() {
        let styling = Styling::resolve(&fields("PROBLEM", "Average"), &icons()).unwrap();
        assert_eq!(styling.status_badge, "lozenge-error");
        assert_eq!(styling.severity_badge, "lozenge-current");
        assert_eq!(styling.color, Color::Yellow);
        assert_eq!(styling.icon.as_deref(), Some("http://xyz.com/prob.png"));
    }

    #[test]
    fn test_ok_forces_green() {
        let styling = Styling::resolve(&fields("OK", "Disaster"), &icons()).unwrap();
        assert_eq!(styling.status_badge, "lozenge-success");
        assert_eq!(styling.severity_badge, "lozenge-error");
        assert_eq!(styling.color, Color::Green);
        assert_eq!(styling.icon.as_deref(), Some("http://xyz.com/ok.png"));
    }

    #[test]
    fn test_severity_table() {
        let cases = [
            ("Not classified", "lozenge", Color::Gray),
            ("Information", "lozenge", Color::Gray),
            ("Warning", "lozenge-current", Color::Yellow),
            ("Average", "lozenge-current", Color::Yellow),
            ("High", "lozenge-error", Color::Red),
            ("Disaster", "lozenge-error", Color::Red),
        ];

        for (severity, badge, color) in cases {
            let styling = Styling::resolve(&fields("PROBLEM", severity), &icons()).unwrap();
            assert_eq!(styling.severity_badge, badge, "badge for {severity}");
            assert_eq!(styling.color, color, "color for {severity}");
            assert_eq!(styling.severity.to_string(), severity);
        }
    }

    #[test]
    fn test_status_is_case_sensitive() {
        let err = Styling::resolve(&fields("ok", "High"), &icons()).unwrap_err();
        assert!(matches!(err, AppError::UnknownStatus { value } if value == "ok"));
    }

    #[test]
    fn test_unknown_severity_is_rejected() {
        let err = Styling::resolve(&fields("PROBLEM", "Critical"), &icons()).unwrap_err();
        assert!(matches!(err, AppError::UnknownSeverity { value } if value == "Critical"));
    }

    #[test]
    fn test_missing_icon_stays_unset() {
        let styling = Styling::resolve(&fields("OK", "High"), &Icons::default()).unwrap();
        assert_eq!(styling.icon, None);
    }

    #[test]
    fn test_color_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Color::Gray).unwrap(), "\"gray\"");
    }
}

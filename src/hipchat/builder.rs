//! Assembly of the HipChat card notification from parsed alert fields

use tracing::debug;

use super::payload::{Activity, Attribute, Card, Description, Icon, NotificationPayload};
use crate::alert::{AlertFields, Styling};
use crate::config::{NotifierConfig, TemplateSettings};
use crate::errors::AppResult;
use crate::templates::{TemplateContext, TemplateEngine};

const CARD_STYLE: &str = "application";
const CARD_FORMAT: &str = "medium";
const HTML_FORMAT: &str = "html";
const HOSTNAME_STYLE: &str = "lozenge";
/// Event history window linked from the card, in seconds (one week)
const EVENTS_PERIOD_SECS: u32 = 604_800;

/// Builds the HipChat card notification for one alert
///
/// Building is pure: the same fields and config always produce an equal
/// payload, and therefore identical JSON.
#[derive(Debug, Clone)]
pub struct NotificationBuilder<'a> {
    config: &'a NotifierConfig,
    templates: TemplateEngine,
}

impl<'a> NotificationBuilder<'a> {
    pub fn new(config: &'a NotifierConfig) -> AppResult<Self> {
        Self::with_templates(config, &TemplateSettings::default())
    }

    pub fn with_templates(config: &'a NotifierConfig, templates: &TemplateSettings) -> AppResult<Self> {
        Ok(Self {
            config,
            templates: TemplateEngine::with_overrides(templates)?,
        })
    }

    pub fn build(&self, fields: &AlertFields) -> AppResult<NotificationPayload> {
        let styling = Styling::resolve(fields, self.config.icons())?;
        debug!(
            status = %styling.status,
            severity = %styling.severity,
            color = %styling.color,
            event_id = %fields.event_id,
            "resolved alert styling"
        );

        let context = TemplateContext {
            status: &fields.status,
            name: &fields.name,
            triggerid: &fields.trigger_id,
            eventid: &fields.event_id,
            hostname: &fields.hostname,
            severity: &fields.severity,
            url: &fields.url,
            description: &fields.description,
            zbxurl: self.config.zabbix_url(),
        };

        let message = self.templates.render_message(&context)?;
        let description = self.templates.render_description(&context)?;

        Ok(NotificationPayload {
            notify: "true",
            color: styling.color,
            message,
            card: self.card(fields, &styling, description),
            message_format: HTML_FORMAT,
        })
    }

    fn card(&self, fields: &AlertFields, styling: &Styling, description: String) -> Card {
        Card {
            style: CARD_STYLE,
            format: CARD_FORMAT,
            url: format!(
                "{}/events.php?filter_set=1&triggerid={}&period={}",
                self.config.zabbix_url(),
                fields.trigger_id,
                EVENTS_PERIOD_SECS
            ),
            id: fields.event_id.clone(),
            title: fields.name.clone(),
            activity: Activity {
                html: format!(
                    "<b><span class='aui-lozenge aui-{}'>{}</span> {}</b>",
                    styling.status_badge, fields.status, fields.name
                ),
            },
            description: Description {
                format: HTML_FORMAT,
                value: description,
            },
            icon: styling.icon.clone().map(|url| Icon { url }),
            attributes: vec![
                Attribute::new("Status", fields.status.as_str(), styling.status_badge),
                Attribute::new("Severity", fields.severity.as_str(), styling.severity_badge),
                Attribute::new("Hostname", fields.hostname.as_str(), HOSTNAME_STYLE),
            ],
        }
    }
}

//! Handlebars templates for the message line and card description
//!
//! Both outputs share the same block of Zabbix links, registered once as the
//! `links` partial. Values are inserted verbatim: HipChat receives HTML and
//! Zabbix macros are trusted input, so escaping is switched off.

use handlebars::{no_escape, Handlebars};
use serde::Serialize;

use crate::config::TemplateSettings;
use crate::errors::{AppError, AppResult};

pub const MESSAGE_TEMPLATE: &str = "message";
pub const DESCRIPTION_TEMPLATE: &str = "description";
const LINKS_PARTIAL: &str = "links";

const DEFAULT_LINKS: &str = concat!(
    "<a href='{{zbxurl}}/tr_comments.php?triggerid={{triggerid}}'>More Information</a>",
    " | <a href='{{zbxurl}}/events.php?filter_set=1&triggerid={{triggerid}}&period=604800'>Events</a>",
    " | <a href='{{zbxurl}}/zabbix.php?action=acknowledge.edit&acknowledge_type=1",
    "&eventids[]={{eventid}}&backurl=tr_status.php'>Acknowledge</a>",
    " | <a href='{{url}}'>Trigger Link</a>",
);

const DEFAULT_MESSAGE: &str = "{{status}}:{{name}} \n {{> links}}</b>";
const DEFAULT_DESCRIPTION: &str = "<b>{{> links}}</b>";

/// Values available to every template
#[derive(Debug, Clone, Serialize)]
pub struct TemplateContext<'a> {
    pub status: &'a str,
    pub name: &'a str,
    pub triggerid: &'a str,
    pub eventid: &'a str,
    pub hostname: &'a str,
    pub severity: &'a str,
    pub url: &'a str,
    pub description: &'a str,
    pub zbxurl: &'a str,
}

#[derive(Debug, Clone)]
pub struct TemplateEngine {
    handlebars: Handlebars<'static>,
}

impl TemplateEngine {
    pub fn new() -> AppResult<Self> {
        Self::with_overrides(&TemplateSettings::default())
    }

    /// Build the engine, replacing built-in templates with any configured ones
    pub fn with_overrides(overrides: &TemplateSettings) -> AppResult<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(false);
        handlebars.register_escape_fn(no_escape);

        handlebars
            .register_partial(LINKS_PARTIAL, DEFAULT_LINKS)
            .map_err(|e| AppError::template_with_source("Failed to register links partial", e))?;

        let message = overrides.message.as_deref().unwrap_or(DEFAULT_MESSAGE);
        let description = overrides.description.as_deref().unwrap_or(DEFAULT_DESCRIPTION);

        for (name, source) in [(MESSAGE_TEMPLATE, message), (DESCRIPTION_TEMPLATE, description)] {
            handlebars.register_template_string(name, source).map_err(|e| {
                AppError::template_with_source(format!("Failed to register template: {name}"), e)
            })?;
        }

        if overrides.message.is_some() || overrides.description.is_some() {
            tracing::debug!("using custom templates from settings");
        }

        Ok(Self { handlebars })
    }

    pub fn render(&self, template_name: &str, context: &TemplateContext<'_>) -> AppResult<String> {
        self.handlebars.render(template_name, context).map_err(|e| {
            AppError::template_with_source(format!("Failed to render template: {template_name}"), e)
        })
    }

    pub fn render_message(&self, context: &TemplateContext<'_>) -> AppResult<String> {
        self.render(MESSAGE_TEMPLATE, context)
    }

    pub fn render_description(&self, context: &TemplateContext<'_>) -> AppResult<String> {
        self.render(DESCRIPTION_TEMPLATE, context)
    }
}

//! Notification handler
//!
//! Validates configuration, parses the alert, builds the card and posts it.
//! Every step fails fast; nothing is sent unless all earlier steps succeed.

use tracing::info;

use super::{Cli, CliContext};
use zabbix_hipcard::alert::AlertFields;
use zabbix_hipcard::config::{Icons, NotifierConfig};
use zabbix_hipcard::errors::{AppError, AppResult};
use zabbix_hipcard::hipchat::{HipChatClient, NotificationBuilder};

pub struct CommandHandler<'a> {
    context: &'a CliContext,
}

impl<'a> CommandHandler<'a> {
    pub fn new(context: &'a CliContext) -> Self {
        Self { context }
    }

    pub fn handle(&self, cli: &Cli) -> AppResult<()> {
        let settings = self.context.config_manager.settings();

        let icons = Icons::new(cli.ok_icon.clone(), cli.problem_icon.clone()).or(&settings.icons);
        let config = NotifierConfig::new(
            cli.room_id.as_str(),
            cli.tenant.as_str(),
            cli.token.as_str(),
            cli.zabbix_url.as_str(),
        )?
        .with_icons(icons);

        let fields = AlertFields::parse(&cli.message)?;
        info!(
            trigger_id = %fields.trigger_id,
            event_id = %fields.event_id,
            status = %fields.status,
            severity = %fields.severity,
            hostname = %fields.hostname,
            "parsed alert"
        );

        let payload = NotificationBuilder::with_templates(&config, &settings.templates)?.build(&fields)?;

        let mut hipchat = settings.hipchat.clone();
        if let Some(timeout_secs) = cli.timeout_secs {
            hipchat.timeout_secs = timeout_secs;
        }
        let client = HipChatClient::new(&config, &hipchat)?;

        if cli.dry_run {
            println!("Dry run - would send notification:");
            println!("POST {}", client.redacted_endpoint());
            println!("{}", payload.to_json_pretty()?);
            return Ok(());
        }

        let response = client.send(&payload)?;
        let status = response.status();
        let body = response
            .text()
            .map_err(|e| AppError::transport(config.room_id(), e))?;

        println!("HipChat responded with {status}");
        if !body.is_empty() {
            println!("{body}");
        }

        Ok(())
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::alert::Status;
use crate::errors::{AppError, AppResult};

/// Icon URLs shown on the card for each trigger status
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Icons {
    pub ok: Option<String>,
    pub problem: Option<String>,
}

impl Icons {
    pub fn new(ok: Option<String>, problem: Option<String>) -> Self {
        Self {
            ok: ok.filter(|url| !url.is_empty()),
            problem: problem.filter(|url| !url.is_empty()),
        }
    }

    pub fn for_status(&self, status: Status) -> Option<&str> {
        match status {
            Status::Ok => self.ok.as_deref(),
            Status::Problem => self.problem.as_deref(),
        }
    }

    /// Fill unset icons from `fallback`
    pub fn or(self, fallback: &Icons) -> Self {
        Self {
            ok: self.ok.or_else(|| fallback.ok.clone()),
            problem: self.problem.or_else(|| fallback.problem.clone()),
        }
    }
}

/// Per-invocation notifier settings
///
/// Built once from the alert script arguments and never mutated afterwards.
/// Construction fails before anything touches the network if a required
/// value is empty.
#[derive(Clone, PartialEq, Eq)]
pub struct NotifierConfig {
    room_id: String,
    tenant: String,
    token: String,
    zabbix_url: String,
    icons: Icons,
}

impl NotifierConfig {
    pub fn new(
        room_id: impl Into<String>,
        tenant: impl Into<String>,
        token: impl Into<String>,
        zabbix_url: impl Into<String>,
    ) -> AppResult<Self> {
        let config = Self {
            room_id: required("room id", room_id.into())?,
            tenant: required("tenant", tenant.into())?,
            token: required("API token", token.into())?,
            zabbix_url: required("Zabbix URL", zabbix_url.into())?,
            icons: Icons::default(),
        };

        if config.tenant.contains(['/', ':', '?', '#']) {
            return Err(AppError::config(format!(
                "tenant '{}' must be a bare HipChat account name",
                config.tenant
            )));
        }

        Ok(config)
    }

    pub fn with_icons(mut self, icons: Icons) -> Self {
        self.icons = icons;
        self
    }

    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    pub fn tenant(&self) -> &str {
        &self.tenant
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Base URL of the Zabbix frontend, used verbatim in card links
    pub fn zabbix_url(&self) -> &str {
        &self.zabbix_url
    }

    pub fn icons(&self) -> &Icons {
        &self.icons
    }
}

impl fmt::Debug for NotifierConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotifierConfig")
            .field("room_id", &self.room_id)
            .field("tenant", &self.tenant)
            .field("token", &"<redacted>")
            .field("zabbix_url", &self.zabbix_url)
            .field("icons", &self.icons)
            .finish()
    }
}

fn required(key: &str, value: String) -> AppResult<String> {
    if value.trim().is_empty() {
        return Err(AppError::missing(key));
    }
    Ok(value)
}

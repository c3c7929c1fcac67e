//! HTTP dispatch of room notifications to the HipChat v2 API

use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use std::time::Duration;
use tracing::{info, warn};
use url::Url;

use super::payload::NotificationPayload;
use crate::config::{HipChatSettings, NotifierConfig};
use crate::errors::{AppError, AppResult};

const USER_AGENT: &str = concat!("zabbix-hipcard/", env!("CARGO_PKG_VERSION"));
const AUTH_TOKEN_PARAM: &str = "auth_token";

/// Blocking client for a single room notification endpoint
///
/// The HTTP response is handed back untouched; a non-2xx status is logged but
/// is not turned into an error, and nothing is retried.
#[derive(Debug, Clone)]
pub struct HipChatClient {
    client: Client,
    endpoint: Url,
    room_id: String,
}

impl HipChatClient {
    pub fn new(config: &NotifierConfig, settings: &HipChatSettings) -> AppResult<Self> {
        settings.validate()?;
        let endpoint = notification_url(config, settings.server_url.as_deref())?;

        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AppError::HttpClient {
                message: "failed to initialise blocking HTTP client".to_string(),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            endpoint,
            room_id: config.room_id().to_string(),
        })
    }

    /// Full endpoint, including the auth token
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Endpoint safe to print or log
    pub fn redacted_endpoint(&self) -> String {
        let mut url = self.endpoint.clone();
        url.set_query(Some(&format!("{AUTH_TOKEN_PARAM}=REDACTED")));
        url.to_string()
    }

    pub fn send(&self, payload: &NotificationPayload) -> AppResult<Response> {
        let body = payload.to_json()?;

        info!(
            room = %self.room_id,
            endpoint = %self.redacted_endpoint(),
            color = %payload.color,
            bytes = body.len(),
            "posting room notification"
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(body)
            .send()
            .map_err(|e| AppError::transport(&self.room_id, e))?;

        let status = response.status();
        if status.is_success() {
            info!(room = %self.room_id, status = status.as_u16(), "notification accepted");
        } else {
            warn!(room = %self.room_id, status = status.as_u16(), "HipChat returned a non-success status");
        }

        Ok(response)
    }
}

/// `{server}/v2/room/{room}/notification?auth_token={token}`
///
/// `server` defaults to `https://{tenant}.hipchat.com`. The room id is
/// percent-encoded as a single path segment, so room names work as well as
/// numeric ids.
pub fn notification_url(config: &NotifierConfig, server_url: Option<&str>) -> AppResult<Url> {
    let server = match server_url {
        Some(server) => server.to_string(),
        None => format!("https://{}.hipchat.com", config.tenant()),
    };

    let mut url = Url::parse(&server).map_err(|e| AppError::InvalidEndpoint {
        url: server.clone(),
        source: Some(Box::new(e)),
    })?;
    url.path_segments_mut()
        .map_err(|()| AppError::InvalidEndpoint {
            url: server.clone(),
            source: None,
        })?
        .pop_if_empty()
        .extend(["v2", "room", config.room_id(), "notification"]);
    url.query_pairs_mut()
        .clear()
        .append_pair(AUTH_TOKEN_PARAM, config.token());

    Ok(url)
}

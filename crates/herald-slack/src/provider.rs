//! Slack implementation of the messaging provider capability.

use std::fmt;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use herald_core::{
    ConfigError, DeliveryError, Message, MessagingProvider, ProviderConfig, ProviderFactory,
    SendResult,
};
use serde_json::Value;
use tracing::debug;

use crate::block_kit::SlackBlock;
use crate::slack_api_client::{SlackApiClient, SlackPostedMessage};
use crate::translate::translate_message;

pub const SLACK_PROVIDER_NAME: &str = "slack";
pub const DEFAULT_SLACK_API_BASE: &str = "https://slack.com/api";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

const CONFIG_KEY_TOKEN: &str = "token";
const CONFIG_KEY_API_BASE: &str = "api_base";
const CONFIG_KEY_REQUEST_TIMEOUT_MS: &str = "request_timeout_ms";

#[async_trait]
/// Delivery capability: transmits Block Kit content to a Slack channel.
pub trait SlackDelivery: Send + Sync {
    async fn post_blocks(
        &self,
        channel: &str,
        blocks: &[SlackBlock],
        thread_ts: Option<&str>,
    ) -> Result<SlackPostedMessage>;
}

#[async_trait]
impl SlackDelivery for SlackApiClient {
    async fn post_blocks(
        &self,
        channel: &str,
        blocks: &[SlackBlock],
        thread_ts: Option<&str>,
    ) -> Result<SlackPostedMessage> {
        SlackApiClient::post_blocks(self, channel, blocks, thread_ts).await
    }
}

#[derive(Clone, PartialEq, Eq)]
/// Slack options recognized in a request's `config` mapping.
pub struct SlackProviderConfig {
    pub token: String,
    pub api_base: String,
    pub request_timeout_ms: u64,
}

impl fmt::Debug for SlackProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlackProviderConfig")
            .field("token", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("request_timeout_ms", &self.request_timeout_ms)
            .finish()
    }
}

impl SlackProviderConfig {
    pub fn from_config(config: &ProviderConfig) -> Result<Self, ConfigError> {
        let token = config
            .get(CONFIG_KEY_TOKEN)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::MissingCredential {
                provider: SLACK_PROVIDER_NAME,
            })?;

        let api_base = match config.get(CONFIG_KEY_API_BASE) {
            None | Some(Value::Null) => DEFAULT_SLACK_API_BASE.to_string(),
            Some(Value::String(value)) if !value.trim().is_empty() => value.trim().to_string(),
            Some(_) => {
                return Err(ConfigError::InvalidOption {
                    key: CONFIG_KEY_API_BASE.to_string(),
                    reason: "expected a non-empty string".to_string(),
                })
            }
        };

        let request_timeout_ms = match config.get(CONFIG_KEY_REQUEST_TIMEOUT_MS) {
            None | Some(Value::Null) => DEFAULT_REQUEST_TIMEOUT_MS,
            Some(value) => value.as_u64().ok_or_else(|| ConfigError::InvalidOption {
                key: CONFIG_KEY_REQUEST_TIMEOUT_MS.to_string(),
                reason: "expected a non-negative integer".to_string(),
            })?,
        };

        Ok(Self {
            token: token.to_string(),
            api_base,
            request_timeout_ms,
        })
    }
}

/// Provider that translates messages and hands them to a Slack delivery.
pub struct SlackProvider<D = SlackApiClient> {
    delivery: D,
}

impl<D> SlackProvider<D>
where
    D: SlackDelivery,
{
    pub fn new(delivery: D) -> Self {
        Self { delivery }
    }

    pub fn delivery(&self) -> &D {
        &self.delivery
    }
}

#[async_trait]
impl<D> MessagingProvider for SlackProvider<D>
where
    D: SlackDelivery,
{
    async fn send(&self, message: &Message) -> Result<SendResult, DeliveryError> {
        let blocks = translate_message(message);
        let thread_ts = message.reply_thread();
        debug!(
            channel = %message.channel,
            blocks = blocks.len(),
            threaded = thread_ts.is_some(),
            "sending slack message"
        );
        let posted = self
            .delivery
            .post_blocks(&message.channel, &blocks, thread_ts)
            .await?;
        Ok(SendResult {
            id: posted.ts,
            channel: posted.channel,
            sent_at: Utc::now(),
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Builds `SlackProvider` instances backed by the Slack Web API.
pub struct SlackProviderFactory;

impl ProviderFactory for SlackProviderFactory {
    type Provider = SlackProvider<SlackApiClient>;

    fn configure(&self, config: &ProviderConfig) -> Result<Self::Provider, ConfigError> {
        let config = SlackProviderConfig::from_config(config)?;
        let client = SlackApiClient::new(
            &config.api_base,
            &config.token,
            config.request_timeout_ms,
        )
        .map_err(|error| ConfigError::Client(format!("{error:#}")))?;
        debug!(api_base = %client.api_base(), "configured slack provider");
        Ok(SlackProvider::new(client))
    }
}

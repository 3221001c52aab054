//! Capability contracts implemented by platform messaging adapters.

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::message::{Message, SendResult};

/// Raw `config` mapping supplied by the host on a request frame.
pub type ProviderConfig = Map<String, Value>;

#[derive(Debug, Error, PartialEq, Eq)]
/// Enumerates supported `ConfigError` values.
pub enum ConfigError {
    #[error("{provider} token is required")]
    MissingCredential { provider: &'static str },
    #[error("invalid config option `{key}`: {reason}")]
    InvalidOption { key: String, reason: String },
    #[error("failed to initialize messaging client: {0}")]
    Client(String),
}

#[derive(Debug, Error)]
#[error("{0:#}")]
/// Failure reported by the delivery capability, passed through verbatim.
pub struct DeliveryError(anyhow::Error);

impl DeliveryError {
    pub fn cause(&self) -> &anyhow::Error {
        &self.0
    }
}

impl From<anyhow::Error> for DeliveryError {
    fn from(error: anyhow::Error) -> Self {
        Self(error)
    }
}

#[async_trait]
/// Trait contract for `MessagingProvider` behavior.
pub trait MessagingProvider: Send + Sync {
    async fn send(&self, message: &Message) -> Result<SendResult, DeliveryError>;
}

/// Builds a configured provider from a request's `config` mapping.
pub trait ProviderFactory {
    type Provider: MessagingProvider;

    fn configure(&self, config: &ProviderConfig) -> Result<Self::Provider, ConfigError>;
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;

    use super::{ConfigError, DeliveryError};

    #[test]
    fn unit_config_error_messages_are_human_readable() {
        assert_eq!(
            ConfigError::MissingCredential { provider: "slack" }.to_string(),
            "slack token is required"
        );
        assert_eq!(
            ConfigError::InvalidOption {
                key: "api_base".to_string(),
                reason: "expected a non-empty string".to_string(),
            }
            .to_string(),
            "invalid config option `api_base`: expected a non-empty string"
        );
    }

    #[test]
    fn unit_delivery_error_renders_full_context_chain() {
        let error = DeliveryError::from(
            anyhow!("channel_not_found").context("slack chat.postMessage failed"),
        );
        assert_eq!(
            error.to_string(),
            "slack chat.postMessage failed: channel_not_found"
        );
        assert_eq!(error.cause().root_cause().to_string(), "channel_not_found");
    }
}

//! Slack adapter for the Herald messaging bridge.
//!
//! Translates generic messages into Block Kit blocks, posts them through the
//! Slack Web API, and exposes the result as a `MessagingProvider`.

pub mod block_kit;
pub mod provider;
pub mod slack_api_client;
pub mod translate;

pub use block_kit::{SlackBlock, SlackTextObject};
pub use provider::{
    SlackDelivery, SlackProvider, SlackProviderConfig, SlackProviderFactory,
    DEFAULT_REQUEST_TIMEOUT_MS, DEFAULT_SLACK_API_BASE, SLACK_PROVIDER_NAME,
};
pub use slack_api_client::{SlackApiClient, SlackPostedMessage};
pub use translate::{rewrite_markdown_links, translate_message};

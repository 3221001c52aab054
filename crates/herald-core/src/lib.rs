//! Platform-agnostic message schema and provider contracts shared across
//! Herald crates.
//!
//! Hosts the generic message contract accepted from the host process, the
//! send result returned after delivery, and the capability traits a
//! platform adapter implements to be driven by the bridge runtime.

pub mod message;
pub mod provider;

pub use message::{ContentBlock, ContentBlockError, Message, SectionField, SendResult};
pub use provider::{
    ConfigError, DeliveryError, MessagingProvider, ProviderConfig, ProviderFactory,
};

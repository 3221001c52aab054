use herald_core::{ConfigError, Message, MessagingProvider, ProviderConfig, ProviderFactory};
use serde_json::Value;
use tracing::{debug, info};

use super::{parse_rpc_request_frame, RpcError, RpcRequestFrame, RPC_METHOD_MESSAGING_SEND};

/// Routes request frames to a lazily provisioned messaging provider.
///
/// The provider is built from the `config` of the first request that
/// configures successfully and is reused for every later request; later
/// `config` values are ignored. Requests are handled one at a time, so the
/// provider slot needs no synchronization.
pub struct RpcDispatcher<F>
where
    F: ProviderFactory,
{
    factory: F,
    provider: Option<F::Provider>,
}

impl<F> RpcDispatcher<F>
where
    F: ProviderFactory,
{
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            provider: None,
        }
    }

    pub fn provider(&self) -> Option<&F::Provider> {
        self.provider.as_ref()
    }

    pub fn is_provisioned(&self) -> bool {
        self.provider.is_some()
    }

    /// Decodes and dispatches one raw request line.
    pub async fn dispatch_raw(&mut self, raw: &[u8]) -> Result<Value, RpcError> {
        let request = parse_rpc_request_frame(raw)?;
        self.dispatch_request(request).await
    }

    pub async fn dispatch_request(&mut self, request: RpcRequestFrame) -> Result<Value, RpcError> {
        debug!(method = %request.method, "dispatching rpc request");
        let provider = self.ensure_provider(&request.config)?;
        match request.method.as_str() {
            RPC_METHOD_MESSAGING_SEND => {
                let message = serde_json::from_value::<Message>(request.payload)
                    .map_err(RpcError::Payload)?;
                let result = provider.send(&message).await?;
                serde_json::to_value(result).map_err(RpcError::Encode)
            }
            other => Err(RpcError::UnknownMethod(other.to_string())),
        }
    }

    fn ensure_provider(&mut self, config: &ProviderConfig) -> Result<&F::Provider, ConfigError> {
        let provider = match self.provider.take() {
            Some(provider) => provider,
            None => {
                let provider = self.factory.configure(config)?;
                info!("messaging provider configured");
                provider
            }
        };
        Ok(self.provider.insert(provider))
    }
}

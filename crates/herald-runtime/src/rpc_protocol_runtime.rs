//! NDJSON request/response protocol spoken with the host process.
//!
//! Each input line carries one request frame `{method, config, payload}` and
//! yields exactly one response frame holding either `result` or `error`.

use herald_core::{ConfigError, DeliveryError, ProviderConfig};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

mod dispatch;
mod parsing;
mod transport;

pub use dispatch::RpcDispatcher;
pub use parsing::parse_rpc_request_frame;
pub use transport::{serve_rpc_ndjson, write_rpc_response_frame};

pub const RPC_METHOD_MESSAGING_SEND: &str = "messaging.send";

#[derive(Debug, Clone, PartialEq, Deserialize)]
/// One decoded request frame.
pub struct RpcRequestFrame {
    #[serde(default, deserialize_with = "parsing::null_as_default")]
    pub method: String,
    #[serde(default, deserialize_with = "parsing::null_as_default")]
    pub config: ProviderConfig,
    #[serde(default)]
    pub payload: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// One response frame; exactly one of `result` or `error` is set.
pub struct RpcResponseFrame {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RpcResponseFrame {
    pub fn success(result: Value) -> Self {
        Self {
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            result: None,
            error: Some(message.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

#[derive(Debug, Error)]
/// Enumerates supported `RpcError` values.
pub enum RpcError {
    #[error("failed to decode request frame: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("invalid messaging payload: {0}")]
    Payload(#[source] serde_json::Error),
    #[error("unknown method: {0}")]
    UnknownMethod(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
    #[error("failed to encode result: {0}")]
    Encode(#[source] serde_json::Error),
}

impl RpcError {
    /// Framing failures end the session; everything else only fails one request.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Decode(_))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Summary of one serve session.
pub struct RpcServeReport {
    pub processed_frames: usize,
    pub error_count: usize,
    pub terminated_on_decode_error: bool,
}

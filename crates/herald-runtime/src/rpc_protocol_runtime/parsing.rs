use serde::{Deserialize, Deserializer};

use super::{RpcError, RpcRequestFrame};

/// Decodes one raw request line into a frame.
pub fn parse_rpc_request_frame(raw: &[u8]) -> Result<RpcRequestFrame, RpcError> {
    serde_json::from_slice::<RpcRequestFrame>(raw).map_err(RpcError::Decode)
}

/// A missing or `null` method routes as an unknown method, not a framing error.
pub(super) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

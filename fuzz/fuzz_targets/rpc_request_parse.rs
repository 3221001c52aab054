#![no_main]

use herald_runtime::{parse_rpc_request_frame, RpcError};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Err(error) = parse_rpc_request_frame(data) {
        assert!(matches!(error, RpcError::Decode(_)));
        assert!(error.is_fatal());
    }
});

//! Request/response runtime that exposes a messaging provider to a host
//! process over newline-delimited JSON frames.

pub mod rpc_protocol_runtime;

pub use rpc_protocol_runtime::*;

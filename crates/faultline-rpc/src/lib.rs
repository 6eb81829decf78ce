//! JSON-RPC transport for faultline
//!
//! Implements [`faultline_core::RpcTransport`] for `http(s)://` endpoints via
//! reqwest and `ws(s)://` endpoints via tokio-tungstenite. Every call opens its
//! own connection and tears it down before returning.

pub mod error;
pub mod message;
pub mod transport;

pub use error::RpcClientError;
pub use message::{JsonRpcErrorObject, JsonRpcRequest, JsonRpcResponse};
pub use transport::JsonRpcClient;

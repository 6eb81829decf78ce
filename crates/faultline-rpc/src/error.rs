//! Error types for the JSON-RPC transport

use faultline_core::TransportError;
use thiserror::Error;

/// Errors raised while talking to a JSON-RPC endpoint
#[derive(Error, Debug)]
pub enum RpcClientError {
    #[error("invalid endpoint URL: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    #[error("unsupported endpoint scheme '{scheme}' (expected http, https, ws or wss)")]
    UnsupportedScheme { scheme: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("malformed JSON-RPC response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("connection closed before a response arrived")]
    ConnectionClosed,
}

impl RpcClientError {
    /// Map onto the transport taxonomy shared with the dispatcher
    pub fn into_transport(self, endpoint: &str) -> TransportError {
        match self {
            RpcClientError::Http(e) if e.is_decode() => TransportError::InvalidResponse {
                reason: e.to_string(),
            },
            RpcClientError::Json(e) => TransportError::InvalidResponse {
                reason: e.to_string(),
            },
            RpcClientError::ConnectionClosed => TransportError::InvalidResponse {
                reason: RpcClientError::ConnectionClosed.to_string(),
            },
            other => TransportError::Connect {
                endpoint: endpoint.to_string(),
                reason: other.to_string(),
            },
        }
    }
}

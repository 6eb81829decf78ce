//! Connection-per-call JSON-RPC client

use async_trait::async_trait;
use faultline_core::{RpcSettings, RpcTransport, TransportError};
use futures::{SinkExt, StreamExt};
use serde_json::Value;
use std::time::Duration;
use tokio_tungstenite::tungstenite::Message;
use tracing::debug;
use url::Url;

use crate::error::RpcClientError;
use crate::message::{next_request_id, JsonRpcRequest, JsonRpcResponse};

/// JSON-RPC client that dials the endpoint fresh for every call
#[derive(Debug, Clone, Default)]
pub struct JsonRpcClient {
    timeout: Option<Duration>,
}

impl JsonRpcClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: &RpcSettings) -> Self {
        Self {
            timeout: settings.timeout(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    async fn dispatch(
        &self,
        endpoint: &str,
        method: &str,
        params: &[Value],
    ) -> Result<Result<Value, TransportError>, RpcClientError> {
        let url = Url::parse(endpoint)?;
        let id = next_request_id();
        let request = JsonRpcRequest::new(id, method, params);

        match url.scheme() {
            "http" | "https" => call_http(endpoint, &request).await,
            "ws" | "wss" => call_ws(endpoint, &request).await,
            scheme => Err(RpcClientError::UnsupportedScheme {
                scheme: scheme.to_string(),
            }),
        }
    }
}

#[async_trait]
impl RpcTransport for JsonRpcClient {
    async fn call(
        &self,
        endpoint: &str,
        method: &str,
        params: Vec<Value>,
    ) -> Result<Value, TransportError> {
        let pending = self.dispatch(endpoint, method, &params);

        let outcome = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, pending).await.map_err(|_| {
                TransportError::Timeout {
                    duration_ms: limit.as_millis() as u64,
                }
            })?,
            None => pending.await,
        };

        outcome.map_err(|e| e.into_transport(endpoint))?
    }
}

// ----------------------------------------------------------------------------
// HTTP
// ----------------------------------------------------------------------------

async fn call_http(
    endpoint: &str,
    request: &JsonRpcRequest<'_>,
) -> Result<Result<Value, TransportError>, RpcClientError> {
    // No idle pooling: the connection goes away with the client
    let client = reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .build()?;

    debug!("POST {} id={} method={}", endpoint, request.id, request.method);
    let response = client.post(endpoint).json(request).send().await?;
    let status = response.status();
    let body = response.bytes().await?;

    if !status.is_success() {
        // Some clients answer JSON-RPC errors with a non-2xx status
        if let Ok(decoded) = serde_json::from_slice::<JsonRpcResponse>(&body) {
            if decoded.error.is_some() {
                return Ok(decoded.into_result());
            }
        }
        return Ok(Err(TransportError::Http {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            body: String::from_utf8_lossy(&body).trim().to_string(),
        }));
    }

    let decoded: JsonRpcResponse = serde_json::from_slice(&body)?;
    Ok(decoded.into_result())
}

// ----------------------------------------------------------------------------
// WebSocket
// ----------------------------------------------------------------------------

async fn call_ws(
    endpoint: &str,
    request: &JsonRpcRequest<'_>,
) -> Result<Result<Value, TransportError>, RpcClientError> {
    let (mut socket, _) = tokio_tungstenite::connect_async(endpoint).await?;

    debug!("WS {} id={} method={}", endpoint, request.id, request.method);
    socket
        .send(Message::Text(serde_json::to_string(request)?))
        .await?;

    let mut answer = None;
    while let Some(frame) = socket.next().await {
        let decoded: JsonRpcResponse = match frame? {
            Message::Text(text) => serde_json::from_str(&text)?,
            Message::Binary(bytes) => serde_json::from_slice(&bytes)?,
            Message::Close(_) => break,
            _ => continue,
        };
        // Subscription notifications and stray replies are skipped
        if decoded.answers(request.id) {
            answer = Some(decoded);
            break;
        }
    }

    if let Err(e) = socket.close(None).await {
        debug!("Closing WebSocket to {} failed: {}", endpoint, e);
    }

    answer
        .map(JsonRpcResponse::into_result)
        .ok_or(RpcClientError::ConnectionClosed)
}

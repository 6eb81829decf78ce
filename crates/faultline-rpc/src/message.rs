//! JSON-RPC 2.0 envelopes

use faultline_core::TransportError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Allocate a request id, unique within the process
pub fn next_request_id() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// Outgoing call
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: &'a [Value],
}

impl<'a> JsonRpcRequest<'a> {
    pub fn new(id: u64, method: &'a str, params: &'a [Value]) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            method,
            params,
        }
    }
}

/// Error member of a response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JsonRpcErrorObject {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub data: Option<Value>,
}

/// Incoming response
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<JsonRpcErrorObject>,
}

impl JsonRpcResponse {
    /// Whether this response answers the request with `id`
    pub fn answers(&self, id: u64) -> bool {
        self.id.as_ref().and_then(Value::as_u64) == Some(id)
    }

    /// A remote error wins over any result; a missing result is `null`
    pub fn into_result(self) -> Result<Value, TransportError> {
        match self.error {
            Some(error) => {
                let message = match error.data {
                    Some(data) => format!("{} ({})", error.message, data),
                    None => error.message,
                };
                Err(TransportError::Remote {
                    code: error.code,
                    message,
                })
            }
            None => Ok(self.result.unwrap_or(Value::Null)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_serializes_as_json_rpc_2() {
        let params = vec![json!("0x10")];
        let request = JsonRpcRequest::new(7, "debug_setHead", &params);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"jsonrpc": "2.0", "id": 7, "method": "debug_setHead", "params": ["0x10"]})
        );
    }

    #[test]
    fn empty_params_serialize_as_empty_array() {
        let request = JsonRpcRequest::new(1, "admin_stopRPC", &[]);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["params"], json!([]));
    }

    #[test]
    fn remote_error_carries_code_and_data() {
        let response: JsonRpcResponse = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "id": 3,
            "error": {"code": -32000, "message": "execution reverted", "data": "0x08c379a0"}
        }))
        .unwrap();
        assert!(response.answers(3));
        match response.into_result() {
            Err(TransportError::Remote { code, message }) => {
                assert_eq!(code, -32000);
                assert!(message.contains("execution reverted"));
                assert!(message.contains("0x08c379a0"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn null_result_is_success() {
        let response: JsonRpcResponse =
            serde_json::from_value(json!({"jsonrpc": "2.0", "id": 1, "result": null})).unwrap();
        assert_eq!(response.into_result().unwrap(), Value::Null);
    }

    #[test]
    fn ids_increase() {
        let first = next_request_id();
        let second = next_request_id();
        assert!(second > first);
    }
}

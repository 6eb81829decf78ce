//! Action backends
//!
//! One backend per injection mode. Each maps its typed actions onto a single
//! call through an external transport; the transports themselves are behind
//! the [`RpcTransport`] and [`ContainerRuntime`] traits so they can be
//! swapped for stubs in tests.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::errors::TransportError;
use crate::registry::ContainerAction;
use crate::request::RpcAction;

// ----------------------------------------------------------------------------
// Transport Traits
// ----------------------------------------------------------------------------

/// Remote procedure call boundary
///
/// Implementations open a connection per call and release it on every exit
/// path, including when the returned future is dropped.
#[async_trait]
pub trait RpcTransport: Send + Sync {
    /// Invoke `method` with positional `params` and return the raw result
    async fn call(
        &self,
        endpoint: &str,
        method: &str,
        params: Vec<Value>,
    ) -> Result<Value, TransportError>;
}

/// Combined stdout/stderr of a container command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub combined: String,
}

impl CommandOutput {
    pub fn new(combined: impl Into<String>) -> Self {
        Self {
            combined: combined.into(),
        }
    }
}

/// Container lifecycle boundary
///
/// Only the exit status decides success; output is kept for diagnostics.
#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    async fn run(
        &self,
        action: ContainerAction,
        container_id: &str,
    ) -> Result<CommandOutput, TransportError>;
}

#[async_trait]
impl<T: RpcTransport + ?Sized> RpcTransport for Arc<T> {
    async fn call(
        &self,
        endpoint: &str,
        method: &str,
        params: Vec<Value>,
    ) -> Result<Value, TransportError> {
        (**self).call(endpoint, method, params).await
    }
}

#[async_trait]
impl<C: ContainerRuntime + ?Sized> ContainerRuntime for Arc<C> {
    async fn run(
        &self,
        action: ContainerAction,
        container_id: &str,
    ) -> Result<CommandOutput, TransportError> {
        (**self).run(action, container_id).await
    }
}

// ----------------------------------------------------------------------------
// RPC Backend
// ----------------------------------------------------------------------------

/// JSON-RPC method names used by the RPC backend
pub mod methods {
    pub const SET_HEAD: &str = "debug_setHead";
    pub const CLEAR_TX_POOL: &str = "txpool_clear";
    pub const FORKCHOICE_UPDATED: &str = "engine_forkchoiceUpdatedV2";
    pub const STOP_RPC: &str = "admin_stopRPC";
    pub const SLEEP: &str = "admin_sleep";
    pub const REMOVE_PEER: &str = "admin_removePeer";
    pub const FREE_OS_MEMORY: &str = "debug_freeOSMemory";
}

/// Method and positional arguments for an RPC action
pub fn rpc_call_shape(action: &RpcAction) -> (&'static str, Vec<Value>) {
    match action {
        RpcAction::SetHead { block } => (methods::SET_HEAD, vec![json!(block)]),
        RpcAction::ClearTxPool => (methods::CLEAR_TX_POOL, vec![]),
        RpcAction::TriggerFork { head_hash } => {
            let forkchoice_state = json!({
                "headBlockHash": head_hash,
                "safeBlockHash": head_hash,
                "finalizedBlockHash": head_hash,
            });
            let payload_attributes = json!({});
            (
                methods::FORKCHOICE_UPDATED,
                vec![forkchoice_state, payload_attributes],
            )
        }
        RpcAction::StopRpc => (methods::STOP_RPC, vec![]),
        RpcAction::PauseRpc { duration } => (methods::SLEEP, vec![json!(duration)]),
        RpcAction::DropPeers { enode } => (methods::REMOVE_PEER, vec![json!(enode)]),
        RpcAction::FreeMemory => (methods::FREE_OS_MEMORY, vec![]),
    }
}

/// Runs RPC faults through a transport, one call per action
pub struct RpcBackend<T> {
    transport: T,
}

impl<T: RpcTransport> RpcBackend<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Execute an action against `endpoint`
    pub async fn execute(
        &self,
        endpoint: &str,
        action: &RpcAction,
    ) -> Result<Value, TransportError> {
        let (method, params) = rpc_call_shape(action);
        self.call(endpoint, method, params).await
    }

    async fn call(
        &self,
        endpoint: &str,
        method: &str,
        params: Vec<Value>,
    ) -> Result<Value, TransportError> {
        info!("Calling {} on {} with params: {:?}", method, endpoint, params);

        match self.transport.call(endpoint, method, params).await {
            Ok(result) => {
                debug!("{} returned {}", method, result);
                info!("{} completed", method);
                Ok(result)
            }
            Err(e) => {
                error!("{} failed: {}", method, e);
                Err(e)
            }
        }
    }
}

// ----------------------------------------------------------------------------
// Container Backend
// ----------------------------------------------------------------------------

/// Runs container lifecycle faults through a runtime, one command per action
pub struct ContainerBackend<C> {
    runtime: C,
}

impl<C: ContainerRuntime> ContainerBackend<C> {
    pub fn new(runtime: C) -> Self {
        Self { runtime }
    }

    pub fn runtime(&self) -> &C {
        &self.runtime
    }

    pub async fn execute(
        &self,
        container_id: &str,
        action: ContainerAction,
    ) -> Result<CommandOutput, TransportError> {
        info!("Executing container {} on {}", action, container_id);

        match self.runtime.run(action, container_id).await {
            Ok(output) => {
                info!("Container {} succeeded: {}", action, output.combined.trim());
                Ok(output)
            }
            Err(e) => {
                error!("Container {} failed: {}", action, e);
                Err(e)
            }
        }
    }
}

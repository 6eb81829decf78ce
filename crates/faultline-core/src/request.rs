//! Injection requests
//!
//! [`InjectionRequest`] carries the raw strings a caller supplied.
//! [`ValidatedRequest`] can only be produced by the validator and carries a
//! typed [`Fault`] with every argument its backend call needs.

use crate::config::DEFAULT_RPC_ENDPOINT;
use crate::errors::ValidationError;
use crate::registry::{ContainerAction, InjectionMode, RpcTarget, TargetSpec};

// ----------------------------------------------------------------------------
// Raw Request
// ----------------------------------------------------------------------------

/// One fault injection as requested by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectionRequest {
    pub mode: String,
    pub target: String,
    pub param: Option<String>,
    pub container_id: Option<String>,
    pub endpoint: String,
}

impl InjectionRequest {
    pub fn new(mode: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            mode: mode.into(),
            target: target.into(),
            param: None,
            container_id: None,
            endpoint: DEFAULT_RPC_ENDPOINT.to_string(),
        }
    }

    /// RPC mode request against the default endpoint
    pub fn rpc(target: impl Into<String>) -> Self {
        Self::new(InjectionMode::Rpc.as_str(), target)
    }

    /// OS mode request against a container
    pub fn os(target: impl Into<String>, container_id: impl Into<String>) -> Self {
        Self::new(InjectionMode::Os.as_str(), target).with_container_id(container_id)
    }

    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.param = Some(param.into());
        self
    }

    pub fn with_container_id(mut self, container_id: impl Into<String>) -> Self {
        self.container_id = Some(container_id.into());
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Shorthand for [`crate::validate`]
    pub fn validate(&self) -> Result<ValidatedRequest, ValidationError> {
        crate::validator::validate(self)
    }
}

// ----------------------------------------------------------------------------
// Typed Faults
// ----------------------------------------------------------------------------

/// An RPC fault together with its argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RpcAction {
    SetHead { block: String },
    ClearTxPool,
    TriggerFork { head_hash: String },
    StopRpc,
    PauseRpc { duration: String },
    DropPeers { enode: String },
    FreeMemory,
}

impl RpcAction {
    /// Build the action for a target. Targets without a parameter discard `param`.
    pub(crate) fn from_target(target: RpcTarget, param: &str) -> Self {
        match target {
            RpcTarget::SetHead => Self::SetHead {
                block: param.to_string(),
            },
            RpcTarget::ClearTxPool => Self::ClearTxPool,
            RpcTarget::TriggerFork => Self::TriggerFork {
                head_hash: param.to_string(),
            },
            RpcTarget::StopRpc => Self::StopRpc,
            RpcTarget::PauseRpc => Self::PauseRpc {
                duration: param.to_string(),
            },
            RpcTarget::DropPeers => Self::DropPeers {
                enode: param.to_string(),
            },
            RpcTarget::FreeMemory => Self::FreeMemory,
        }
    }

    pub fn target(&self) -> RpcTarget {
        match self {
            Self::SetHead { .. } => RpcTarget::SetHead,
            Self::ClearTxPool => RpcTarget::ClearTxPool,
            Self::TriggerFork { .. } => RpcTarget::TriggerFork,
            Self::StopRpc => RpcTarget::StopRpc,
            Self::PauseRpc { .. } => RpcTarget::PauseRpc,
            Self::DropPeers { .. } => RpcTarget::DropPeers,
            Self::FreeMemory => RpcTarget::FreeMemory,
        }
    }
}

/// A fully resolved fault, one variant per mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fault {
    Rpc {
        endpoint: String,
        action: RpcAction,
    },
    Container {
        container_id: String,
        action: ContainerAction,
    },
}

// ----------------------------------------------------------------------------
// Validated Request
// ----------------------------------------------------------------------------

/// A request that passed validation; consumed once by the dispatcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    spec: &'static TargetSpec,
    param: Option<String>,
    fault: Fault,
}

impl ValidatedRequest {
    pub(crate) fn new(spec: &'static TargetSpec, param: Option<String>, fault: Fault) -> Self {
        Self { spec, param, fault }
    }

    pub fn mode(&self) -> InjectionMode {
        self.spec.mode
    }

    /// Registry name of the target, e.g. `setHead`
    pub fn target(&self) -> &'static str {
        self.spec.name
    }

    pub fn spec(&self) -> &'static TargetSpec {
        self.spec
    }

    /// The parameter forwarded to the backend, if the target takes one
    pub fn param(&self) -> Option<&str> {
        self.param.as_deref()
    }

    pub fn fault(&self) -> &Fault {
        &self.fault
    }
}

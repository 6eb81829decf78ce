//! Target registry
//!
//! The authoritative, static table of fault targets. Targets are partitioned
//! by [`InjectionMode`]; a name is only meaningful inside its own partition.

use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

// ----------------------------------------------------------------------------
// Injection Mode
// ----------------------------------------------------------------------------

/// Backend family used to realize a fault
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InjectionMode {
    /// JSON-RPC calls against the node endpoint
    Rpc,
    /// Container lifecycle commands against the node's container
    Os,
}

impl InjectionMode {
    pub const ALL: [InjectionMode; 2] = [InjectionMode::Rpc, InjectionMode::Os];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rpc => "rpc",
            Self::Os => "os",
        }
    }

    /// OS mode addresses a container and needs its identifier
    pub fn requires_container_id(&self) -> bool {
        matches!(self, Self::Os)
    }
}

impl fmt::Display for InjectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InjectionMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InjectionMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::UnknownMode {
                mode: s.to_string(),
            })
    }
}

// ----------------------------------------------------------------------------
// Parameter Policy
// ----------------------------------------------------------------------------

/// Whether a target needs the free-form injection parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterPolicy {
    None,
    /// A non-empty string is required; the hint names what it should contain
    Required(&'static str),
}

impl ParameterPolicy {
    pub fn is_required(&self) -> bool {
        matches!(self, Self::Required(_))
    }

    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Required(hint) => Some(hint),
        }
    }
}

// ----------------------------------------------------------------------------
// Target Kinds
// ----------------------------------------------------------------------------

/// Faults realized through a JSON-RPC call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RpcTarget {
    SetHead,
    ClearTxPool,
    TriggerFork,
    StopRpc,
    PauseRpc,
    DropPeers,
    FreeMemory,
}

/// Container lifecycle commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerAction {
    Restart,
    Stop,
    Pause,
    Unpause,
    Kill,
}

impl ContainerAction {
    /// Lifecycle verb passed to the container runtime
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Restart => "restart",
            Self::Stop => "stop",
            Self::Pause => "pause",
            Self::Unpause => "unpause",
            Self::Kill => "kill",
        }
    }
}

impl fmt::Display for ContainerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

/// Backend operation a registry entry resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    Rpc(RpcTarget),
    Container(ContainerAction),
}

// ----------------------------------------------------------------------------
// Registry Table
// ----------------------------------------------------------------------------

/// One entry of the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetSpec {
    pub name: &'static str,
    pub mode: InjectionMode,
    pub policy: ParameterPolicy,
    pub description: &'static str,
    pub kind: TargetKind,
}

static RPC_TARGETS: [TargetSpec; 7] = [
    TargetSpec {
        name: "setHead",
        mode: InjectionMode::Rpc,
        policy: ParameterPolicy::Required("block number (hex with 0x prefix or decimal)"),
        description: "Rewind the local chain to the given block (debug_setHead)",
        kind: TargetKind::Rpc(RpcTarget::SetHead),
    },
    TargetSpec {
        name: "clearTxPool",
        mode: InjectionMode::Rpc,
        policy: ParameterPolicy::None,
        description: "Drop all pending transactions (txpool_clear, client-specific)",
        kind: TargetKind::Rpc(RpcTarget::ClearTxPool),
    },
    TargetSpec {
        name: "triggerFork",
        mode: InjectionMode::Rpc,
        policy: ParameterPolicy::Required("head block hash (hex with 0x prefix)"),
        description: "Force a fork choice update to the given head (engine_forkchoiceUpdatedV2)",
        kind: TargetKind::Rpc(RpcTarget::TriggerFork),
    },
    TargetSpec {
        name: "stopRPC",
        mode: InjectionMode::Rpc,
        policy: ParameterPolicy::None,
        description: "Stop the HTTP RPC server (admin_stopRPC); the endpoint goes away",
        kind: TargetKind::Rpc(RpcTarget::StopRpc),
    },
    TargetSpec {
        name: "pauseRPC",
        mode: InjectionMode::Rpc,
        policy: ParameterPolicy::Required("duration in seconds"),
        description: "Block RPC processing for a duration (admin_sleep)",
        kind: TargetKind::Rpc(RpcTarget::PauseRpc),
    },
    TargetSpec {
        name: "dropPeers",
        mode: InjectionMode::Rpc,
        policy: ParameterPolicy::Required("enode URL of the peer"),
        description: "Disconnect a peer (admin_removePeer)",
        kind: TargetKind::Rpc(RpcTarget::DropPeers),
    },
    TargetSpec {
        name: "freeMemory",
        mode: InjectionMode::Rpc,
        policy: ParameterPolicy::None,
        description: "Force garbage collection and return memory to the OS (debug_freeOSMemory)",
        kind: TargetKind::Rpc(RpcTarget::FreeMemory),
    },
];

static OS_TARGETS: [TargetSpec; 5] = [
    TargetSpec {
        name: "restart",
        mode: InjectionMode::Os,
        policy: ParameterPolicy::None,
        description: "Restart the node container",
        kind: TargetKind::Container(ContainerAction::Restart),
    },
    TargetSpec {
        name: "stop",
        mode: InjectionMode::Os,
        policy: ParameterPolicy::None,
        description: "Gracefully stop the node container",
        kind: TargetKind::Container(ContainerAction::Stop),
    },
    TargetSpec {
        name: "pause",
        mode: InjectionMode::Os,
        policy: ParameterPolicy::None,
        description: "Freeze all processes in the node container",
        kind: TargetKind::Container(ContainerAction::Pause),
    },
    TargetSpec {
        name: "unpause",
        mode: InjectionMode::Os,
        policy: ParameterPolicy::None,
        description: "Resume a paused node container",
        kind: TargetKind::Container(ContainerAction::Unpause),
    },
    TargetSpec {
        name: "kill",
        mode: InjectionMode::Os,
        policy: ParameterPolicy::None,
        description: "Kill the node container without a graceful shutdown",
        kind: TargetKind::Container(ContainerAction::Kill),
    },
];

/// All targets of one mode, in registry order
pub fn targets_for(mode: InjectionMode) -> &'static [TargetSpec] {
    match mode {
        InjectionMode::Rpc => &RPC_TARGETS,
        InjectionMode::Os => &OS_TARGETS,
    }
}

/// Look up a target by exact name within a mode
pub fn resolve_target(mode: InjectionMode, name: &str) -> Option<&'static TargetSpec> {
    targets_for(mode).iter().find(|spec| spec.name == name)
}

/// Every registered target across both modes
pub fn all_targets() -> impl Iterator<Item = &'static TargetSpec> {
    InjectionMode::ALL
        .into_iter()
        .flat_map(|mode| targets_for(mode).iter())
}

/// Comma separated target names of a mode, for error messages
pub fn target_names(mode: InjectionMode) -> String {
    targets_for(mode)
        .iter()
        .map(|spec| spec.name)
        .collect::<Vec<_>>()
        .join(", ")
}

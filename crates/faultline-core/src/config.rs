//! Configuration shared by the transports and the CLI

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Endpoint used when no `--rpc` flag or config value is given
pub const DEFAULT_RPC_ENDPOINT: &str = "http://127.0.0.1:8545";

/// Container runtime binary used for OS mode faults
pub const DEFAULT_CONTAINER_BINARY: &str = "docker";

// ----------------------------------------------------------------------------
// Injection Configuration
// ----------------------------------------------------------------------------

/// Top-level configuration, loadable from a TOML file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InjectionConfig {
    pub rpc: RpcSettings,
    pub container: ContainerSettings,
}

/// RPC transport settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RpcSettings {
    /// Node endpoint (http, https, ws or wss)
    pub endpoint: String,
    /// Per-call timeout; unset means the call may block indefinitely
    pub timeout_secs: Option<u64>,
}

impl Default for RpcSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_RPC_ENDPOINT.to_string(),
            timeout_secs: None,
        }
    }
}

impl RpcSettings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Container runtime settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerSettings {
    /// Runtime CLI invoked as `<binary> [args..] <verb> -- <container>`, e.g. docker
    /// or podman
    pub binary: String,
    /// Arguments placed before the lifecycle verb, e.g. `["--context", "remote"]`
    pub args: Vec<String>,
}

impl Default for ContainerSettings {
    fn default() -> Self {
        Self {
            binary: DEFAULT_CONTAINER_BINARY.to_string(),
            args: Vec::new(),
        }
    }
}

//! Command line flags

use clap::Parser;
use std::path::PathBuf;

/// Fault injection tool for Ethereum clients
#[derive(Parser, Debug, Clone)]
#[command(name = "injection", version, about, long_about = None)]
pub struct Cli {
    /// Injection mode: rpc or os
    #[arg(long = "injection-mode", default_value = "rpc")]
    pub injection_mode: String,

    /// Injection target, e.g. setHead, restart, kill
    #[arg(long = "injection-target", required_unless_present = "list_targets")]
    pub injection_target: Option<String>,

    /// Optional parameter for injection, e.g. block number or hash
    #[arg(long = "injection-param")]
    pub injection_param: Option<String>,

    /// Docker container ID for OS injection (if mode=os)
    #[arg(long = "container-id")]
    pub container_id: Option<String>,

    /// RPC provider [default: http://127.0.0.1:8545]
    #[arg(long)]
    pub rpc: Option<String>,

    /// Per-call RPC timeout in seconds (no timeout by default)
    #[arg(long = "rpc-timeout")]
    pub rpc_timeout: Option<u64>,

    /// Container CLI used for OS injection [default: docker]
    #[arg(long = "container-binary")]
    pub container_binary: Option<String>,

    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print the outcome as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// List all injection targets and exit
    #[arg(long = "list-targets")]
    pub list_targets: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

//! Faultline Core
//!
//! Validation and dispatch engine for fault injection against blockchain nodes.
//! A raw [`InjectionRequest`] is checked against the static target registry,
//! turned into a typed [`Fault`], and handed to the [`Dispatcher`], which runs
//! exactly one backend action and reports an [`InjectionOutcome`].
//!
//! Transports are plugged in through the [`RpcTransport`] and
//! [`ContainerRuntime`] traits; concrete implementations live in the
//! `faultline-rpc` and `faultline-docker` crates.

// ----------------------------------------------------------------------------
// Module Declarations
// ----------------------------------------------------------------------------

pub mod backend;
pub mod config;
pub mod dispatcher;
pub mod errors;
pub mod outcome;
pub mod registry;
pub mod request;
pub mod validator;

// ----------------------------------------------------------------------------
// Public API
// ----------------------------------------------------------------------------

pub use backend::{CommandOutput, ContainerBackend, ContainerRuntime, RpcBackend, RpcTransport};
pub use config::{ContainerSettings, InjectionConfig, RpcSettings};
pub use dispatcher::Dispatcher;
pub use errors::{InjectionError, Result, TransportError, ValidationError};
pub use outcome::InjectionOutcome;
pub use registry::{
    resolve_target, targets_for, ContainerAction, InjectionMode, ParameterPolicy, RpcTarget,
    TargetKind, TargetSpec,
};
pub use request::{Fault, InjectionRequest, RpcAction, ValidatedRequest};
pub use validator::validate;

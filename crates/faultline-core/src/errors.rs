//! Error types for fault injection
//!
//! Three layers of failure are kept apart: [`ValidationError`] for malformed
//! requests (detected before any I/O), [`TransportError`] for failures reported
//! by an RPC endpoint or container runtime, and [`InjectionError`] which ties
//! either of them to the mode and target of the request that produced it.

use crate::registry::InjectionMode;
use thiserror::Error;

// ----------------------------------------------------------------------------
// Validation Errors
// ----------------------------------------------------------------------------

/// Reasons a request is rejected before dispatch
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("unknown mode '{mode}' (must be 'rpc' or 'os')")]
    UnknownMode { mode: String },

    #[error("unknown target for mode {mode}: '{target}' (valid: {valid})")]
    UnknownTarget {
        mode: InjectionMode,
        target: String,
        valid: String,
    },

    #[error("missing required parameter for {target}: {hint}")]
    MissingParameter {
        target: &'static str,
        hint: &'static str,
    },

    #[error("missing container identifier for os target {target}")]
    MissingContainerId { target: &'static str },
}

// ----------------------------------------------------------------------------
// Transport Errors
// ----------------------------------------------------------------------------

/// Failures surfaced verbatim from an RPC endpoint or a container runtime
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("failed to connect to {endpoint}: {reason}")]
    Connect { endpoint: String, reason: String },

    #[error("HTTP {status} from {endpoint}: {body}")]
    Http {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("remote error {code}: {message}")]
    Remote { code: i64, message: String },

    #[error("invalid response: {reason}")]
    InvalidResponse { reason: String },

    #[error("call timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error while running {program}: {source}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("command exited with {status}; output: {output}")]
    CommandFailed { status: String, output: String },
}

// ----------------------------------------------------------------------------
// Injection Errors
// ----------------------------------------------------------------------------

/// Top-level error naming the mode and target a failure belongs to
#[derive(Error, Debug)]
pub enum InjectionError {
    #[error("{mode} injection '{target}' rejected: {source}")]
    Rejected {
        mode: String,
        target: String,
        #[source]
        source: ValidationError,
    },

    #[error("{mode} injection '{target}' failed: {source}")]
    Failed {
        mode: InjectionMode,
        target: &'static str,
        #[source]
        source: TransportError,
    },
}

impl InjectionError {
    /// Attach the raw mode and target strings to a validation failure
    pub fn rejected(mode: &str, target: &str, source: ValidationError) -> Self {
        InjectionError::Rejected {
            mode: mode.to_string(),
            target: target.to_string(),
            source,
        }
    }

    /// Whether this error was raised before any external call was attempted
    pub fn is_validation(&self) -> bool {
        matches!(self, InjectionError::Rejected { .. })
    }
}

/// Result type for injection operations
pub type Result<T> = core::result::Result<T, InjectionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_lead_with_reason() {
        let err = ValidationError::MissingContainerId { target: "kill" };
        assert!(err.to_string().starts_with("missing container identifier"));

        let err = ValidationError::UnknownMode { mode: "ssh".into() };
        assert!(err.to_string().starts_with("unknown mode"));
    }

    #[test]
    fn injection_error_names_mode_and_target() {
        let err = InjectionError::Failed {
            mode: InjectionMode::Rpc,
            target: "setHead",
            source: TransportError::Remote {
                code: -32601,
                message: "the method debug_setHead does not exist".into(),
            },
        };
        let text = err.to_string();
        assert!(text.contains("rpc"));
        assert!(text.contains("setHead"));
        assert!(text.contains("does not exist"));
        assert!(!err.is_validation());
    }
}

//! Result record of one dispatched fault

use serde::{Serialize, Serializer};
use std::time::Duration;

use crate::errors::{InjectionError, TransportError};
use crate::registry::InjectionMode;

fn serialize_elapsed<S>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_f64(elapsed.as_micros() as f64 / 1000.0)
}

fn serialize_error<S>(error: &Option<TransportError>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match error {
        Some(e) => serializer.serialize_some(&e.to_string()),
        None => serializer.serialize_none(),
    }
}

/// Success or failure of a fault, with the time the backend call took
#[derive(Debug, Serialize)]
pub struct InjectionOutcome {
    mode: InjectionMode,
    target: &'static str,
    success: bool,
    #[serde(rename = "elapsed_ms", serialize_with = "serialize_elapsed")]
    elapsed: Duration,
    #[serde(
        serialize_with = "serialize_error",
        skip_serializing_if = "Option::is_none"
    )]
    error: Option<TransportError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<String>,
}

impl InjectionOutcome {
    pub fn succeeded(
        mode: InjectionMode,
        target: &'static str,
        elapsed: Duration,
        output: Option<String>,
    ) -> Self {
        Self {
            mode,
            target,
            success: true,
            elapsed,
            error: None,
            output,
        }
    }

    pub fn failed(
        mode: InjectionMode,
        target: &'static str,
        elapsed: Duration,
        error: TransportError,
    ) -> Self {
        Self {
            mode,
            target,
            success: false,
            elapsed,
            error: Some(error),
            output: None,
        }
    }

    pub fn mode(&self) -> InjectionMode {
        self.mode
    }

    pub fn target(&self) -> &'static str {
        self.target
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn error(&self) -> Option<&TransportError> {
        self.error.as_ref()
    }

    /// Diagnostic output captured from a container command
    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    /// Turn a failed outcome into an error naming mode and target
    pub fn into_result(mut self) -> Result<Self, InjectionError> {
        match self.error.take() {
            None => Ok(self),
            Some(source) => Err(InjectionError::Failed {
                mode: self.mode,
                target: self.target,
                source,
            }),
        }
    }
}

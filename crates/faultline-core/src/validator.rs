//! Request validation
//!
//! Checks run in a fixed order and stop at the first violation:
//! mode, target within mode, required parameter, container identifier.
//! Validation is pure; nothing here touches the network or spawns processes.

use tracing::debug;

use crate::errors::ValidationError;
use crate::registry::{self, InjectionMode, ParameterPolicy, TargetKind};
use crate::request::{Fault, InjectionRequest, RpcAction, ValidatedRequest};

/// Validate a raw request and resolve it into a typed fault
pub fn validate(request: &InjectionRequest) -> Result<ValidatedRequest, ValidationError> {
    let mode: InjectionMode = request.mode.parse()?;

    let spec = registry::resolve_target(mode, &request.target).ok_or_else(|| {
        ValidationError::UnknownTarget {
            mode,
            target: request.target.clone(),
            valid: registry::target_names(mode),
        }
    })?;

    let param = present(request.param.as_deref());
    let param = match spec.policy {
        ParameterPolicy::Required(hint) => Some(param.ok_or(ValidationError::MissingParameter {
            target: spec.name,
            hint,
        })?),
        ParameterPolicy::None => {
            if let Some(ignored) = param {
                debug!("Ignoring parameter '{}' for {} (takes none)", ignored, spec.name);
            }
            None
        }
    };

    let container_id = present(request.container_id.as_deref()).map(str::trim);
    if mode.requires_container_id() && container_id.is_none() {
        return Err(ValidationError::MissingContainerId { target: spec.name });
    }

    let fault = match spec.kind {
        TargetKind::Rpc(target) => Fault::Rpc {
            endpoint: request.endpoint.clone(),
            action: RpcAction::from_target(target, param.unwrap_or_default()),
        },
        TargetKind::Container(action) => Fault::Container {
            container_id: container_id.unwrap_or_default().to_string(),
            action,
        },
    };

    Ok(ValidatedRequest::new(spec, param.map(str::to_string), fault))
}

/// Treat blank strings as absent
fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

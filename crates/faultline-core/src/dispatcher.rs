//! Fault dispatcher
//!
//! Runs exactly one backend action for a validated request and reports how
//! long it took. Backend errors become failed outcomes; they are never
//! retried or suppressed.

use std::time::Instant;
use tracing::{info, warn};

use crate::backend::{ContainerBackend, ContainerRuntime, RpcBackend, RpcTransport};
use crate::errors::{InjectionError, TransportError};
use crate::outcome::InjectionOutcome;
use crate::request::{Fault, InjectionRequest, RpcAction, ValidatedRequest};
use crate::validator;

/// Selects the backend for a request and times the call
pub struct Dispatcher<T, C> {
    rpc: RpcBackend<T>,
    container: ContainerBackend<C>,
}

impl<T: RpcTransport, C: ContainerRuntime> Dispatcher<T, C> {
    pub fn new(rpc_transport: T, container_runtime: C) -> Self {
        Self {
            rpc: RpcBackend::new(rpc_transport),
            container: ContainerBackend::new(container_runtime),
        }
    }

    pub fn rpc_backend(&self) -> &RpcBackend<T> {
        &self.rpc
    }

    pub fn container_backend(&self) -> &ContainerBackend<C> {
        &self.container
    }

    /// Run the fault described by `request`
    ///
    /// Dropping the returned future cancels the in-flight backend call; the
    /// transports release their connection or child process when dropped.
    pub async fn dispatch(&self, request: ValidatedRequest) -> InjectionOutcome {
        info!("=== Fault Injection ===");
        info!("Mode: {}", request.mode());
        info!("Target: {}", request.target());
        if let Some(param) = request.param() {
            info!("Parameter: {}", param);
        }

        let start = Instant::now();
        let result = self.execute(request.fault()).await;
        let elapsed = start.elapsed();

        match result {
            Ok(output) => {
                info!(
                    "{} injection '{}' completed successfully in {:?}",
                    request.mode(),
                    request.target(),
                    elapsed
                );
                InjectionOutcome::succeeded(request.mode(), request.target(), elapsed, output)
            }
            Err(e) => InjectionOutcome::failed(request.mode(), request.target(), elapsed, e),
        }
    }

    /// Validate a raw request, then dispatch it
    pub async fn run(
        &self,
        request: &InjectionRequest,
    ) -> Result<InjectionOutcome, InjectionError> {
        let validated = validator::validate(request)
            .map_err(|e| InjectionError::rejected(&request.mode, &request.target, e))?;
        Ok(self.dispatch(validated).await)
    }

    async fn execute(&self, fault: &Fault) -> Result<Option<String>, TransportError> {
        match fault {
            Fault::Rpc { endpoint, action } => {
                if matches!(action, RpcAction::StopRpc) {
                    warn!("This will stop the RPC server on {}!", endpoint);
                }
                self.rpc.execute(endpoint, action).await.map(|_| None)
            }
            Fault::Container {
                container_id,
                action,
            } => self
                .container
                .execute(container_id, *action)
                .await
                .map(|output| Some(output.combined)),
        }
    }
}

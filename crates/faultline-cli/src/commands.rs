//! Command flow for the `injection` binary

use faultline_core::{
    registry::all_targets, Dispatcher, InjectionConfig, InjectionError, InjectionMode,
    InjectionOutcome, InjectionRequest, ParameterPolicy,
};
use faultline_docker::DockerCli;
use faultline_rpc::JsonRpcClient;
use tracing::warn;

use crate::cli::Cli;
use crate::error::{CliError, Result};

/// Run the command described by the flags
pub async fn execute(cli: &Cli, config: &InjectionConfig) -> Result<()> {
    if cli.list_targets {
        print!("{}", render_target_list());
        return Ok(());
    }

    let request = build_request(cli, config);
    let validated = request
        .validate()
        .map_err(|e| InjectionError::rejected(&request.mode, &request.target, e))?;

    let dispatcher = Dispatcher::new(
        JsonRpcClient::from_settings(&config.rpc),
        DockerCli::from_settings(&config.container),
    );

    let mode = validated.mode();
    let target = validated.target();

    // Dropping the dispatch future on Ctrl-C closes the connection or kills the child
    let outcome = tokio::select! {
        outcome = dispatcher.dispatch(validated) => outcome,
        Ok(()) = tokio::signal::ctrl_c() => {
            warn!("Interrupted, cancelling {} injection '{}'", mode, target);
            return Err(CliError::Cancelled { mode, target });
        }
    };

    report(&outcome, cli.json)?;
    outcome.into_result()?;
    Ok(())
}

/// Assemble the raw request from flags and resolved configuration
pub fn build_request(cli: &Cli, config: &InjectionConfig) -> InjectionRequest {
    InjectionRequest {
        mode: cli.injection_mode.clone(),
        target: cli.injection_target.clone().unwrap_or_default(),
        param: cli.injection_param.clone(),
        container_id: cli.container_id.clone(),
        endpoint: config.rpc.endpoint.clone(),
    }
}

fn report(outcome: &InjectionOutcome, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(outcome)?);
    } else if outcome.is_success() {
        if let Some(output) = outcome.output().map(str::trim).filter(|o| !o.is_empty()) {
            println!("{}", output);
        }
        println!(
            "\n✓ {} injection '{}' completed successfully in {:?}",
            outcome.mode(),
            outcome.target(),
            outcome.elapsed()
        );
    }
    Ok(())
}

/// Human readable listing of every registered target
pub fn render_target_list() -> String {
    let mut out = String::new();
    let mut current = None;

    for spec in all_targets() {
        if current != Some(spec.mode) {
            current = Some(spec.mode);
            let note = match spec.mode {
                InjectionMode::Rpc => "(uses --rpc)",
                InjectionMode::Os => "(requires --container-id)",
            };
            out.push_str(&format!("\n{} targets {}:\n", spec.mode, note));
        }
        let param = match spec.policy {
            ParameterPolicy::Required(hint) => format!("param: {}", hint),
            ParameterPolicy::None => "-".to_string(),
        };
        out.push_str(&format!(
            "  {:<12} {}\n  {:<12} {}\n",
            spec.name, spec.description, "", param
        ));
    }

    out
}

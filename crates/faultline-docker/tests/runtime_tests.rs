//! Integration tests for the container CLI runtime
//!
//! A shell script stands in for docker: the runtime is pointed at `sh` with
//! the script as its leading argument, so `sh fake.sh <verb> -- <container>` runs.

#![cfg(unix)]

use faultline_core::{
    ContainerAction, ContainerRuntime, Dispatcher, InjectionRequest, TransportError,
};
use faultline_docker::DockerCli;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ----------------------------------------------------------------------------
// Test Utilities
// ----------------------------------------------------------------------------

fn write_script(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("fake-docker.sh");
    std::fs::write(&path, body).unwrap();
    path
}

fn fake_cli(script: &Path) -> DockerCli {
    DockerCli::new("sh").with_args([script.to_string_lossy().to_string()])
}

// ----------------------------------------------------------------------------
// Exit Status
// ----------------------------------------------------------------------------

#[tokio::test]
async fn success_captures_stdout_and_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let script = write_script(
        dir.path(),
        "echo \"$1 $3\"\necho 'warning: slow daemon' >&2\nexit 0\n",
    );

    let output = fake_cli(&script)
        .run(ContainerAction::Restart, "geth-1")
        .await
        .unwrap();

    assert!(output.combined.contains("restart geth-1"));
    assert!(output.combined.contains("warning: slow daemon"));
}

#[tokio::test]
async fn non_zero_exit_fails_with_output() {
    let dir = tempfile::tempdir().unwrap();
    let script = write_script(
        dir.path(),
        "echo \"Error response from daemon: No such container: $3\" >&2\nexit 1\n",
    );

    let err = fake_cli(&script)
        .run(ContainerAction::Kill, "geth-9")
        .await
        .unwrap_err();

    match err {
        TransportError::CommandFailed { status, output } => {
            assert!(status.contains('1'));
            assert_eq!(output, "Error response from daemon: No such container: geth-9");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn stdout_is_ignored_for_success_decision() {
    let dir = tempfile::tempdir().unwrap();
    let script = write_script(dir.path(), "echo 'Error: this looks bad'\nexit 0\n");

    let result = fake_cli(&script).run(ContainerAction::Pause, "geth-1").await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn dash_prefixed_id_is_not_a_flag() {
    let dir = tempfile::tempdir().unwrap();
    let script = write_script(dir.path(), "printf '%s\\n' \"$@\"\n");

    let output = fake_cli(&script)
        .run(ContainerAction::Kill, "--help")
        .await
        .unwrap();

    let args: Vec<_> = output.combined.lines().collect();
    assert_eq!(args, ["kill", "--", "--help"]);
}

#[tokio::test]
async fn missing_binary_is_spawn_error() {
    let err = DockerCli::new("/nonexistent/faultline-docker")
        .run(ContainerAction::Stop, "geth-1")
        .await
        .unwrap_err();

    match err {
        TransportError::Spawn { program, .. } => {
            assert_eq!(program, "/nonexistent/faultline-docker")
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

// ----------------------------------------------------------------------------
// Cancellation
// ----------------------------------------------------------------------------

#[cfg(target_os = "linux")]
fn process_is_gone(pid: u32) -> bool {
    match std::fs::read_to_string(format!("/proc/{pid}/stat")) {
        // Field 3 is the state; a killed child awaiting reaping shows as Z
        Ok(stat) => stat
            .rsplit(')')
            .next()
            .map_or(true, |rest| rest.trim_start().starts_with('Z')),
        Err(_) => true,
    }
}

#[cfg(target_os = "linux")]
#[tokio::test]
async fn dropped_call_kills_child() {
    let dir = tempfile::tempdir().unwrap();
    let pid_file = dir.path().join("pid");
    let script = write_script(
        dir.path(),
        &format!("echo $$ > {}\nexec sleep 30\n", pid_file.display()),
    );
    let cli = fake_cli(&script);

    let result = tokio::time::timeout(
        Duration::from_millis(500),
        cli.run(ContainerAction::Stop, "geth-1"),
    )
    .await;
    assert!(result.is_err());

    let pid: u32 = std::fs::read_to_string(&pid_file)
        .unwrap()
        .trim()
        .parse()
        .unwrap();

    let mut gone = false;
    for _ in 0..50 {
        if process_is_gone(pid) {
            gone = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert!(gone, "child {pid} survived cancellation");
}

// ----------------------------------------------------------------------------
// End to End
// ----------------------------------------------------------------------------

struct NoRpc;

#[async_trait::async_trait]
impl faultline_core::RpcTransport for NoRpc {
    async fn call(
        &self,
        _endpoint: &str,
        method: &str,
        _params: Vec<serde_json::Value>,
    ) -> Result<serde_json::Value, TransportError> {
        panic!("rpc transport used for container fault ({method})");
    }
}

#[tokio::test]
async fn dispatcher_runs_container_fault() {
    let dir = tempfile::tempdir().unwrap();
    let script = write_script(dir.path(), "echo \"$3\"\n");
    let dispatcher = Dispatcher::new(NoRpc, fake_cli(&script));

    let outcome = dispatcher
        .run(&InjectionRequest::os("unpause", "geth-1"))
        .await
        .unwrap();

    assert!(outcome.is_success());
    assert_eq!(outcome.output().map(str::trim), Some("geth-1"));
}

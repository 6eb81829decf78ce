//! Container CLI runtime
//!
//! Each call spawns one child process with stdout and stderr piped into a
//! single combined buffer. The child is killed if the call is dropped before
//! it exits.

use async_trait::async_trait;
use faultline_core::{
    CommandOutput, ContainerAction, ContainerRuntime, ContainerSettings, TransportError,
};
use std::io;
use std::process::Stdio;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{ChildStderr, ChildStdout, Command};
use tracing::{debug, info};

const READ_CHUNK: usize = 4096;

/// Runs lifecycle verbs through a container CLI
#[derive(Debug, Clone)]
pub struct DockerCli {
    binary: String,
    args: Vec<String>,
}

impl Default for DockerCli {
    fn default() -> Self {
        Self::from_settings(&ContainerSettings::default())
    }
}

impl DockerCli {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            args: Vec::new(),
        }
    }

    pub fn from_settings(settings: &ContainerSettings) -> Self {
        Self {
            binary: settings.binary.clone(),
            args: settings.args.clone(),
        }
    }

    /// Arguments inserted before the lifecycle verb
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    fn command(&self, action: ContainerAction, container_id: &str) -> Command {
        let mut command = Command::new(&self.binary);
        command
            .args(&self.args)
            .arg(action.verb())
            // A leading '-' in the id must not be parsed as a flag
            .arg("--")
            .arg(container_id)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        command
    }

    fn io_error(&self, source: io::Error) -> TransportError {
        TransportError::Io {
            program: self.binary.clone(),
            source,
        }
    }
}

#[async_trait]
impl ContainerRuntime for DockerCli {
    async fn run(
        &self,
        action: ContainerAction,
        container_id: &str,
    ) -> Result<CommandOutput, TransportError> {
        info!(
            "Executing: {} {} {} -- {}",
            self.binary,
            self.args.join(" "),
            action.verb(),
            container_id
        );

        let mut child = self
            .command(action, container_id)
            .spawn()
            .map_err(|source| TransportError::Spawn {
                program: self.binary.clone(),
                source,
            })?;

        let (stdout, stderr) = match (child.stdout.take(), child.stderr.take()) {
            (Some(stdout), Some(stderr)) => (stdout, stderr),
            _ => {
                return Err(self.io_error(io::Error::new(
                    io::ErrorKind::BrokenPipe,
                    "child output pipes were not captured",
                )))
            }
        };

        let combined = collect_combined(stdout, stderr)
            .await
            .map_err(|e| self.io_error(e))?;
        let status = child.wait().await.map_err(|e| self.io_error(e))?;
        let output = String::from_utf8_lossy(&combined).to_string();

        debug!("{} {} exited with {}", self.binary, action.verb(), status);
        if status.success() {
            Ok(CommandOutput::new(output))
        } else {
            Err(TransportError::CommandFailed {
                status: status.to_string(),
                output: output.trim().to_string(),
            })
        }
    }
}

/// Read both pipes until EOF, keeping chunks in arrival order
async fn collect_combined(stdout: ChildStdout, stderr: ChildStderr) -> io::Result<Vec<u8>> {
    let mut combined = Vec::new();
    let mut stdout = Some(stdout);
    let mut stderr = Some(stderr);
    let mut out_buf = [0u8; READ_CHUNK];
    let mut err_buf = [0u8; READ_CHUNK];

    while stdout.is_some() || stderr.is_some() {
        tokio::select! {
            read = read_chunk(&mut stdout, &mut out_buf), if stdout.is_some() => {
                match read? {
                    0 => stdout = None,
                    n => combined.extend_from_slice(&out_buf[..n]),
                }
            }
            read = read_chunk(&mut stderr, &mut err_buf), if stderr.is_some() => {
                match read? {
                    0 => stderr = None,
                    n => combined.extend_from_slice(&err_buf[..n]),
                }
            }
        }
    }

    Ok(combined)
}

async fn read_chunk<R: AsyncRead + Unpin>(
    reader: &mut Option<R>,
    buf: &mut [u8],
) -> io::Result<usize> {
    match reader {
        Some(reader) => reader.read(buf).await,
        None => Ok(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_places_args_before_verb() {
        let cli = DockerCli::new("docker").with_args(["--context", "remote"]);
        let command = cli.command(ContainerAction::Unpause, "geth-1");
        let std_command = command.as_std();
        let args: Vec<_> = std_command
            .get_args()
            .map(|a| a.to_string_lossy().to_string())
            .collect();
        assert_eq!(std_command.get_program(), "docker");
        assert_eq!(args, ["--context", "remote", "unpause", "--", "geth-1"]);
    }

    #[test]
    fn defaults_to_docker() {
        assert_eq!(DockerCli::default().binary(), "docker");
    }
}

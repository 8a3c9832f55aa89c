//! A [`ProbeExecutor`] that spawns local processes.

use crate::probe::{ProbeCommand, ProbeError, ProbeExecutor, ProbeResult};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Runs probe commands as child processes of zonecrab, capturing both output streams.
///
/// Children are killed when their wait is abandoned, so a probe that times out does not linger.
#[derive(Default, Debug, Clone, Copy)]
pub struct ProcessExecutor;

impl ProcessExecutor {
    async fn run(command: &ProbeCommand, timeout: Duration) -> Result<ProbeResult, ProbeError> {
        let (program, args) = command.argv().ok_or(ProbeError::EmptyCommand)?;
        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        let output = tokio::time::timeout(timeout, child.wait_with_output())
            .await
            .map_err(|_| ProbeError::Timeout(timeout))??;

        Ok(ProbeResult::completed(
            command,
            output.status.code().unwrap_or(crate::probe::NO_EXIT_CODE),
            String::from_utf8_lossy(&output.stdout).into_owned(),
            String::from_utf8_lossy(&output.stderr).into_owned(),
        ))
    }
}

#[async_trait::async_trait]
impl ProbeExecutor for ProcessExecutor {
    async fn execute(&self, command: &ProbeCommand, timeout: Duration) -> ProbeResult {
        match Self::run(command, timeout).await {
            Ok(result) => result,
            Err(err) => {
                match &err {
                    ProbeError::Timeout(t) => {
                        tracing::warn!("\"{command}\" timed out after {t:?}");
                    }
                    _ => tracing::warn!("\"{command}\" could not be run: {err}"),
                }
                ProbeResult::failed(command, &err)
            }
        }
    }
}

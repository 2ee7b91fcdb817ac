use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::domain::Artifact;
use crate::executor::traits::{ExecutionOutput, Executor, LaunchError};

/// Runs artifacts as real child processes with captured stdio.
///
/// The child runs with no arguments and a closed stdin; both output
/// streams are collected in full before the worker inspects the exit
/// status. No timeout is applied, so a hung child blocks its worker
/// until the child exits.
#[derive(Clone, Debug, Default)]
pub struct ProcessExecutor;

impl ProcessExecutor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Executor for ProcessExecutor {
    async fn execute(&self, artifact: &Artifact) -> Result<ExecutionOutput, LaunchError> {
        let child = Command::new(&artifact.path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| LaunchError {
                msg: format!("Failed to spawn process: {}", e),
            })?;

        let output = child.wait_with_output().await.map_err(|e| LaunchError {
            msg: format!("Failed to wait for process: {}", e),
        })?;

        Ok(ExecutionOutput {
            // Signal deaths carry no code; fold them into a non-zero status.
            status: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

use crate::domain::Artifact;

/// Outcome of one child-process invocation that actually ran to
/// completion. A zero status is the only pass signal.
#[derive(Clone, Debug)]
pub struct ExecutionOutput {
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ExecutionOutput {
    pub fn passed(&self) -> bool {
        self.status == 0
    }
}

/// The child process could not be started or waited on.
#[derive(Clone, Debug, thiserror::Error)]
#[error("{msg}")]
pub struct LaunchError {
    pub msg: String,
}

#[mockall::automock]
#[async_trait::async_trait]
pub trait Executor: Send + Sync {
    async fn execute(&self, artifact: &Artifact) -> Result<ExecutionOutput, LaunchError>;
}

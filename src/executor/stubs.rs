use std::time::Duration;

use crate::domain::Artifact;
use crate::executor::traits::{ExecutionOutput, Executor, LaunchError};

/// Test double that resolves to a fixed result after a fixed delay,
/// standing in for the latency of a real child process.
#[derive(Debug, Clone)]
pub struct ExecutorStub {
    result: Result<ExecutionOutput, LaunchError>,
    delay: Duration,
}

impl ExecutorStub {
    pub fn new(result: Result<ExecutionOutput, LaunchError>, delay: Duration) -> Self {
        Self { result, delay }
    }
}

#[async_trait::async_trait]
impl Executor for ExecutorStub {
    async fn execute(&self, artifact: &Artifact) -> Result<ExecutionOutput, LaunchError> {
        tracing::debug!("Stub execution: artifact={:?}", artifact);
        tokio::time::sleep(self.delay).await;
        self.result.clone()
    }
}

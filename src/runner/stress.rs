use std::sync::{Arc, Mutex};

use futures::stream::FuturesUnordered;
use tokio_stream::StreamExt;

use crate::domain::{Artifact, FailureCause, FailureReport, RunMode};
use crate::executor::traits::Executor;
use crate::runner::stop::StopFlag;

/// Drives a fixed pool of workers that execute artifacts repeatedly until
/// the first failure or an external stop.
pub struct StressRunner {
    executor: Arc<dyn Executor>,
    workers: usize,
    mode: RunMode,
}

impl StressRunner {
    pub fn new(executor: Arc<dyn Executor>, workers: usize, mode: RunMode) -> Self {
        Self {
            executor,
            workers: workers.max(1),
            mode,
        }
    }

    /// Runs until a worker detects a failure or `stop` is set by the
    /// caller. Returns only after every spawned worker has terminated.
    ///
    /// The returned report has already been printed to stdout by the
    /// worker that produced it; `None` means the run was interrupted.
    pub async fn run(&self, artifacts: Vec<Artifact>, stop: StopFlag) -> Option<FailureReport> {
        match self.mode {
            RunMode::Pooled => self.stress_pool(Arc::new(artifacts), &stop).await,
            RunMode::PerBinary => {
                for artifact in artifacts {
                    if stop.is_set() {
                        return None;
                    }
                    println!("=== Stressing {} ===", artifact.name());
                    let report = self.stress_pool(Arc::new(vec![artifact]), &stop).await;
                    if report.is_some() {
                        return report;
                    }
                }
                None
            }
        }
    }

    async fn stress_pool(
        &self,
        artifacts: Arc<Vec<Artifact>>,
        stop: &StopFlag,
    ) -> Option<FailureReport> {
        let slot = Arc::new(Mutex::new(None));
        let mut workers = FuturesUnordered::new();

        for worker in 0..self.workers {
            let executor = self.executor.clone();
            let artifacts = artifacts.clone();
            let stop = stop.clone();
            let slot = slot.clone();
            workers.push(tokio::spawn(worker_loop(
                worker, executor, artifacts, stop, slot,
            )));
        }

        while let Some(joined) = workers.next().await {
            if let Err(e) = joined {
                tracing::error!("Worker task did not join cleanly: {}", e);
            }
        }

        match slot.lock() {
            Ok(mut slot) => slot.take(),
            Err(_) => None,
        }
    }
}

/// One worker: pick the next artifact, run it, loop on success. The first
/// worker to observe a failure trips the stop flag; winning that
/// transition makes it the sole reporter for the run.
#[tracing::instrument(skip(executor, artifacts, stop, slot))]
async fn worker_loop(
    worker: usize,
    executor: Arc<dyn Executor>,
    artifacts: Arc<Vec<Artifact>>,
    stop: StopFlag,
    slot: Arc<Mutex<Option<FailureReport>>>,
) {
    let mut iteration: u64 = 0;
    let mut next = 0;

    loop {
        if stop.is_set() {
            tracing::debug!("Stopping after {} iterations", iteration);
            return;
        }

        let artifact = &artifacts[next];
        next = (next + 1) % artifacts.len();

        let cause = match executor.execute(artifact).await {
            Ok(output) if output.passed() => {
                iteration += 1;
                continue;
            }
            Ok(output) => FailureCause::NonZeroExit {
                code: output.status,
                stdout: output.stdout,
                stderr: output.stderr,
            },
            Err(e) => FailureCause::LaunchFailure {
                detail: e.to_string(),
            },
        };

        if stop.trip() {
            let report = FailureReport {
                worker,
                iteration,
                artifact: artifact.clone(),
                cause,
            };
            println!("{}", report);
            if let Ok(mut slot) = slot.lock() {
                *slot = Some(report);
            }
        }
        return;
    }
}

use std::panic;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::domain::RunMode;
use crate::executor::process::ProcessExecutor;
use crate::runner::stop::StopFlag;
use crate::runner::stress::StressRunner;

mod domain;
mod executor;
mod resolver;
mod runner;


#[derive(Parser, Debug)]
#[command(name = "binstress")]
#[command(about = "Parallel stress tester for test executables")]
struct Args {
    /// Path to a test executable or a folder of executables
    #[arg(long, short)]
    target: PathBuf,

    /// Number of workers (default: CPU cores - 1)
    #[arg(long, short = 'j')]
    workers: Option<usize>,

    /// Stress one binary at a time instead of rotating through the pool
    #[arg(long)]
    per_binary: bool,

    /// Enable verbose logging
    #[arg(long, short)]
    verbose: bool,
}

impl Args {
    fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(default_workers).max(1)
    }

    fn mode(&self) -> RunMode {
        if self.per_binary {
            RunMode::PerBinary
        } else {
            RunMode::Pooled
        }
    }
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|cores| cores.get().saturating_sub(1))
        .unwrap_or(1)
        .max(1)
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);
    set_panic_hook();

    let artifacts = match resolver::discover(&args.target) {
        Ok(artifacts) => artifacts,
        Err(e) => {
            println!("{}", e);
            std::process::exit(1);
        }
    };

    tracing::info!(
        "Stressing {} executable(s) with {} worker(s)",
        artifacts.len(),
        args.worker_count()
    );

    let stop = StopFlag::new();
    spawn_interrupt_handler(stop.clone());

    let runner = StressRunner::new(
        Arc::new(ProcessExecutor::new()),
        args.worker_count(),
        args.mode(),
    );
    runner.run(artifacts, stop).await;
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn spawn_interrupt_handler(stop: StopFlag) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received, waiting for workers to wind down");
            stop.set();
        }
    });
}

fn set_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        tracing::error!(
            message = "panic occurred",
            panic = %panic_info
        );
    }));
}

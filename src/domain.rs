use std::borrow::Cow;
use std::fmt;
use std::path::PathBuf;

/// A resolved, executable file path the harness repeatedly invokes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
}

impl Artifact {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// File name for banners and log lines; falls back to the full path.
    pub fn name(&self) -> Cow<'_, str> {
        match self.path.file_name() {
            Some(name) => name.to_string_lossy(),
            None => self.path.to_string_lossy(),
        }
    }
}

/// How workers pick the next artifact to execute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunMode {
    /// All workers share one artifact pool; each rotates through it with a
    /// private index.
    Pooled,
    /// One stress pass per artifact; workers hammer a single binary until
    /// that pass ends.
    PerBinary,
}

/// The single diagnostic produced by a run that ended in failure.
#[derive(Clone, Debug)]
pub struct FailureReport {
    pub worker: usize,
    pub iteration: u64,
    pub artifact: Artifact,
    pub cause: FailureCause,
}

#[derive(Clone, Debug)]
pub enum FailureCause {
    NonZeroExit {
        code: i32,
        stdout: String,
        stderr: String,
    },
    LaunchFailure {
        detail: String,
    },
}

impl fmt::Display for FailureReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.cause {
            FailureCause::NonZeroExit {
                code,
                stdout,
                stderr,
            } => {
                writeln!(
                    f,
                    "[worker {}] failure at iteration {}",
                    self.worker, self.iteration
                )?;
                writeln!(f, "Executable: {}", self.artifact.path.display())?;
                writeln!(f, "Exit code: {}", code)?;
                writeln!(f, "\n--- STDOUT ---\n")?;
                writeln!(f, "{}", stdout)?;
                writeln!(f, "\n--- STDERR ---\n")?;
                write!(f, "{}", stderr)
            }
            FailureCause::LaunchFailure { detail } => {
                writeln!(
                    f,
                    "[worker {}] launch failure at iteration {}",
                    self.worker, self.iteration
                )?;
                writeln!(f, "Executable: {}", self.artifact.path.display())?;
                write!(f, "Error: {}", detail)
            }
        }
    }
}

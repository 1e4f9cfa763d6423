use shader_core::ConfigError;
use std::fmt::Write as _;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single module. Never aborts the rest of the batch.
#[derive(Error, Debug)]
pub enum ModuleError {
    /// The parent directory of the output artifact could not be created.
    #[error("Failed to create output directory {path:?} for shader module '{module}': {source}")]
    OutputDirectoryCreation {
        module: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The compiler ran and exited unsuccessfully.
    #[error("Shader module '{module}' failed to compile ({}){}", exit_label(.exit_code), stderr_suffix(.stderr))]
    CompilationFailed {
        module: String,
        /// `None` when the process was terminated by a signal.
        exit_code: Option<i32>,
        stderr: String,
    },
    /// The compiler process could not be started at all.
    #[error("Failed to launch shader compiler for module '{module}': {source}")]
    CompilerLaunch {
        module: String,
        #[source]
        source: io::Error,
    },
    /// The compiler exceeded the configured timeout and was killed.
    #[error("Shader compiler timed out for module '{module}': {message}")]
    TimedOut { module: String, message: String },
}

impl ModuleError {
    /// Name of the module this error belongs to.
    pub fn module(&self) -> &str {
        match self {
            Self::OutputDirectoryCreation { module, .. }
            | Self::CompilationFailed { module, .. }
            | Self::CompilerLaunch { module, .. }
            | Self::TimedOut { module, .. } => module,
        }
    }
}

fn exit_label(exit_code: &Option<i32>) -> String {
    match exit_code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    }
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim_end();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(":\n{trimmed}")
    }
}

/// Raised after every module was attempted and at least one failed.
#[derive(Error, Debug)]
#[error("{}", render_failures(.attempted, .failures))]
pub struct AggregateBuildError {
    /// Number of modules the run attempted.
    pub attempted: usize,
    /// One entry per failed module, in declaration order.
    pub failures: Vec<ModuleError>,
}

impl AggregateBuildError {
    pub fn failed_modules(&self) -> impl Iterator<Item = &str> {
        self.failures.iter().map(ModuleError::module)
    }
}

fn render_failures(attempted: &usize, failures: &[ModuleError]) -> String {
    let mut out = format!(
        "{} of {} shader module(s) failed to compile",
        failures.len(),
        attempted
    );
    for failure in failures {
        let _ = write!(out, "\n  - {failure}");
    }
    out
}

/// Top-level result of a compile run.
#[derive(Error, Debug)]
pub enum BuildError {
    /// Detected before any process was spawned.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),
    #[error(transparent)]
    Aggregate(#[from] AggregateBuildError),
    #[error("Failed to start compile worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

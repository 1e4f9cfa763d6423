//! The external compiler as a narrow capability: argv in, exit status and stderr out.

use std::env;
use std::ffi::OsString;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

/// Executable name looked up on `PATH` when nothing else is configured.
pub const DEFAULT_COMPILER: &str = "glslc";

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Result of one finished compiler process.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExecutionOutcome {
    /// `None` if the process was terminated by a signal.
    pub exit_code: Option<i32>,
    /// Captured standard error, lossily decoded.
    pub stderr: String,
}

impl ExecutionOutcome {
    pub const fn success(&self) -> bool {
        matches!(self.exit_code, Some(0))
    }
}

/// Runs the shader compiler with a prepared argument vector.
///
/// Implementations only report what happened; interpreting the exit code is the
/// orchestrator's job. An `Err` means the process could not be run to completion
/// (not found, not executable, or timed out with `io::ErrorKind::TimedOut`).
#[cfg_attr(test, mockall::automock)]
pub trait CompilerExecutor {
    fn execute(&self, args: &[OsString]) -> io::Result<ExecutionOutcome>;
}

impl<T: CompilerExecutor + ?Sized> CompilerExecutor for &T {
    fn execute(&self, args: &[OsString]) -> io::Result<ExecutionOutcome> {
        (**self).execute(args)
    }
}

/// Spawns the compiler as a child process.
#[derive(Debug, Clone)]
pub struct ProcessExecutor {
    program: PathBuf,
    leading_args: Vec<OsString>,
    timeout: Option<Duration>,
}

impl Default for ProcessExecutor {
    fn default() -> Self {
        Self::new(DEFAULT_COMPILER)
    }
}

impl ProcessExecutor {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
            timeout: None,
        }
    }

    /// Fixed arguments placed before every planned argument vector,
    /// e.g. `--target-env=vulkan1.3`.
    #[must_use]
    pub fn with_leading_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.leading_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Kill the compiler and fail the module if it runs longer than `timeout`.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn leading_args(&self) -> &[OsString] {
        &self.leading_args
    }

    fn wait_with_deadline(&self, mut child: Child, timeout: Duration) -> io::Result<ExecutionOutcome> {
        // Drain stderr concurrently so a chatty compiler cannot block on a full pipe.
        let (tx, rx) = mpsc::channel();
        if let Some(mut pipe) = child.stderr.take() {
            thread::spawn(move || {
                let mut buf = Vec::new();
                let _ = pipe.read_to_end(&mut buf);
                let _ = tx.send(buf);
            });
        }

        let deadline = Instant::now() + timeout;
        let status = loop {
            let polled = match child.try_wait() {
                Ok(polled) => polled,
                Err(e) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(e);
                }
            };
            if let Some(status) = polled {
                break status;
            }
            if Instant::now() >= deadline {
                let _ = child.kill();
                let _ = child.wait();
                return Err(io::Error::new(
                    io::ErrorKind::TimedOut,
                    format!(
                        "{} did not exit within {}",
                        self.program.display(),
                        humantime::format_duration(timeout)
                    ),
                ));
            }
            thread::sleep(POLL_INTERVAL);
        };

        // A background process spawned by the compiler may keep the pipe open past exit.
        let remaining = deadline.saturating_duration_since(Instant::now());
        let stderr = rx.recv_timeout(remaining).unwrap_or_else(|_| {
            log::warn!(
                "{} exited but its stderr stayed open, diagnostics discarded",
                self.program.display()
            );
            Vec::new()
        });
        Ok(ExecutionOutcome {
            exit_code: status.code(),
            stderr: String::from_utf8_lossy(&stderr).into_owned(),
        })
    }
}

impl CompilerExecutor for ProcessExecutor {
    fn execute(&self, args: &[OsString]) -> io::Result<ExecutionOutcome> {
        let child = Command::new(&self.program)
            .args(&self.leading_args)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()?;

        match self.timeout {
            Some(timeout) => self.wait_with_deadline(child, timeout),
            None => {
                let output = child.wait_with_output()?;
                Ok(ExecutionOutcome {
                    exit_code: output.status.code(),
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                })
            }
        }
    }
}

/// Locates glslc: `PATH` first, then the Vulkan SDK pointed to by `VULKAN_SDK`.
pub fn find_compiler() -> Option<PathBuf> {
    if let Ok(output) = Command::new(DEFAULT_COMPILER)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
    {
        if output.success() {
            return Some(PathBuf::from(DEFAULT_COMPILER));
        }
    }

    let sdk = env::var_os("VULKAN_SDK")?;
    let sdk = PathBuf::from(sdk);
    [
        sdk.join("bin").join(DEFAULT_COMPILER),
        sdk.join("Bin").join("glslc.exe"),
    ]
    .into_iter()
    .find(|candidate| candidate.is_file())
}

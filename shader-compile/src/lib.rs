//! Compiles declared shader modules by invoking an external compiler (glslc by default).
//!
//! The [`CompileOrchestrator`] resolves each module of a
//! [`shader_core::ModuleRegistry`] to absolute paths, builds a deterministic
//! argument vector, ensures the output directory exists, and runs the compiler
//! through a [`CompilerExecutor`]. Tests substitute the executor to avoid
//! spawning real processes.

/// Compiler argument vector construction.
pub mod args;
/// Module and aggregate error types.
pub mod error;
/// External compiler capability and the process-backed implementation.
pub mod executor;
/// Path resolution and per-module compilation.
pub mod orchestrator;

pub use args::{build_args, IncludeDirs};
pub use error::{AggregateBuildError, BuildError, ModuleError};
pub use executor::{
    find_compiler, CompilerExecutor, ExecutionOutcome, ProcessExecutor, DEFAULT_COMPILER,
};
pub use orchestrator::{BuildReport, CompileJob, CompileOrchestrator, CompiledModule};

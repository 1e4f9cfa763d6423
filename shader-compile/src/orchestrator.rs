//! Turns a [`ModuleRegistry`] into compiler invocations.
//!
//! Every module is resolved relative to the task's base directory:
//! - the include root and module sources resolve under the base directory's own anchor,
//! - outputs always land under the build-output root (`<build>/<base>/<output>`).
//!
//! Configuration is checked for every module before the first process is spawned.
//! After that each module compiles independently; failures are collected and
//! reported together once all modules were attempted.

use crate::args::{build_args, IncludeDirs};
use crate::error::{AggregateBuildError, BuildError, ModuleError};
use crate::executor::CompilerExecutor;
use rayon::prelude::*;
use shader_core::{Anchor, ConfigError, ModuleRegistry, RelativePath, ShaderStage};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A fully resolved compiler invocation for one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileJob {
    pub module: String,
    pub stage: ShaderStage,
    pub source: PathBuf,
    pub output: PathBuf,
    pub args: Vec<OsString>,
}

/// A module whose artifact was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledModule {
    pub name: String,
    pub output: PathBuf,
}

/// Summary of a successful run, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub compiled: Vec<CompiledModule>,
}

/// Compiles every module of a registry with an external compiler.
#[derive(Debug)]
pub struct CompileOrchestrator<E> {
    executor: E,
    base_dir: Option<RelativePath>,
    include_dirs: IncludeDirs,
    jobs: usize,
}

impl<E: CompilerExecutor> CompileOrchestrator<E> {
    /// Creates an orchestrator with no base directory, no extra include dirs and one job.
    pub fn new(executor: E) -> Self {
        Self {
            executor,
            base_dir: None,
            include_dirs: IncludeDirs::new(),
            jobs: 1,
        }
    }

    #[must_use]
    pub fn with_base_dir(mut self, base_dir: RelativePath) -> Self {
        self.base_dir = Some(base_dir);
        self
    }

    /// Adds an absolute include directory. Duplicates are ignored.
    #[must_use]
    pub fn with_include_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.include_dirs.insert(dir);
        self
    }

    #[must_use]
    pub fn with_include_dirs<I, P>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.include_dirs.extend(dirs);
        self
    }

    /// Number of compiler processes allowed to run at once. Zero is treated as one.
    #[must_use]
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    pub const fn executor(&self) -> &E {
        &self.executor
    }

    pub const fn base_dir(&self) -> Option<&RelativePath> {
        self.base_dir.as_ref()
    }

    pub const fn include_dirs(&self) -> &IncludeDirs {
        &self.include_dirs
    }

    pub const fn jobs(&self) -> usize {
        self.jobs
    }

    /// Resolves every module and builds its argument vector. Performs no I/O.
    ///
    /// # Errors
    ///
    /// Returns the first configuration problem found: missing base directory,
    /// a relative include directory, or a module without source or output.
    pub fn plan(
        &self,
        registry: &ModuleRegistry,
        source_root: &Path,
        build_root: &Path,
    ) -> Result<Vec<CompileJob>, ConfigError> {
        let base_dir = self.base_dir.as_ref().ok_or(ConfigError::MissingBaseDir)?;
        if let Some(dir) = self.include_dirs.iter().find(|dir| !dir.is_absolute()) {
            return Err(ConfigError::RelativeIncludeDir(dir.clone()));
        }

        let base_path = base_dir.resolve(source_root, build_root);
        let output_base = base_dir.rebased(Anchor::Output);

        registry
            .iter()
            .map(|module| -> Result<CompileJob, ConfigError> {
                let (source, output) = module.paths()?;
                let source = base_dir.compose(source).resolve(source_root, build_root);
                let output = output_base.compose(output).resolve(source_root, build_root);
                let args = build_args(
                    module.stage(),
                    &base_path,
                    &self.include_dirs,
                    &output,
                    &source,
                );
                Ok(CompileJob {
                    module: module.name().to_string(),
                    stage: module.stage(),
                    source,
                    output,
                    args,
                })
            })
            .collect()
    }

    /// Creates the output directory and runs the compiler for one planned job.
    ///
    /// # Errors
    ///
    /// Any [`ModuleError`]; the error always names `job.module`.
    pub fn compile_job(&self, job: &CompileJob) -> Result<CompiledModule, ModuleError> {
        if let Some(parent) = job.output.parent().filter(|p| !p.as_os_str().is_empty()) {
            // create_dir_all treats an existing directory, even one created concurrently, as success
            fs::create_dir_all(parent).map_err(|source| ModuleError::OutputDirectoryCreation {
                module: job.module.clone(),
                path: parent.to_path_buf(),
                source,
            })?;
        }

        log::debug!("Compiling shader module '{}': {:?}", job.module, job.args);
        let outcome = self.executor.execute(&job.args).map_err(|source| {
            if source.kind() == io::ErrorKind::TimedOut {
                ModuleError::TimedOut {
                    module: job.module.clone(),
                    message: source.to_string(),
                }
            } else {
                ModuleError::CompilerLaunch {
                    module: job.module.clone(),
                    source,
                }
            }
        })?;

        if !outcome.success() {
            return Err(ModuleError::CompilationFailed {
                module: job.module.clone(),
                exit_code: outcome.exit_code,
                stderr: outcome.stderr,
            });
        }

        let diagnostics = outcome.stderr.trim();
        if !diagnostics.is_empty() {
            log::warn!("Shader module '{}': {}", job.module, diagnostics);
        }
        log::info!(
            "Compiled shader module '{}' -> {}",
            job.module,
            job.output.display()
        );
        Ok(CompiledModule {
            name: job.module.clone(),
            output: job.output.clone(),
        })
    }
}

impl<E: CompilerExecutor + Sync> CompileOrchestrator<E> {
    /// Compiles every module of `registry`.
    ///
    /// Configuration errors abort before anything is spawned. Otherwise all modules
    /// are attempted, and the run fails with an aggregate of every module error.
    ///
    /// # Errors
    ///
    /// `BuildError::Configuration` for invalid setup, `BuildError::Aggregate` when one
    /// or more modules failed, `BuildError::WorkerPool` if parallel workers could not start.
    pub fn run(
        &self,
        registry: &ModuleRegistry,
        source_root: &Path,
        build_root: &Path,
    ) -> Result<BuildReport, BuildError> {
        let jobs = self.plan(registry, source_root, build_root)?;
        log::info!(
            "Compiling {} shader module(s) with {} job(s)",
            jobs.len(),
            self.jobs
        );

        let results: Vec<Result<CompiledModule, ModuleError>> = if self.jobs > 1 && jobs.len() > 1 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.jobs)
                .build()?;
            pool.install(|| jobs.par_iter().map(|job| self.compile_job(job)).collect())
        } else {
            jobs.iter().map(|job| self.compile_job(job)).collect()
        };

        let attempted = results.len();
        let mut compiled = Vec::with_capacity(attempted);
        let mut failures = Vec::new();
        for result in results {
            match result {
                Ok(module) => compiled.push(module),
                Err(e) => {
                    log::error!("{e}");
                    failures.push(e);
                }
            }
        }

        if failures.is_empty() {
            Ok(BuildReport { compiled })
        } else {
            Err(AggregateBuildError {
                attempted,
                failures,
            }
            .into())
        }
    }
}

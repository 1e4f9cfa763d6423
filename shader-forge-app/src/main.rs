// shader-forge-app/src/main.rs

use crate::config::AppConfig;
use crate::error::AppError;
use crate::logging::init_logger;
use crate::manifest::{load_manifest, Manifest};
use crate::output;
use anyhow::{Context, Result};
use clap::Parser;
use shader_compile::{find_compiler, CompileOrchestrator, ProcessExecutor, DEFAULT_COMPILER};
use shader_core::{Anchor, RelativePath};
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Parses the command line and runs the compile task.
pub fn main() -> Result<()> {
    let config = AppConfig::parse();
    run(&config)
}

/// Runs the compile task for an already parsed configuration.
pub fn run(config: &AppConfig) -> Result<()> {
    init_logger(config);
    log::info!("Shader Forge starting");
    log::debug!("Loaded Config: {:?}", config);

    let manifest = load_manifest(&config.manifest)
        .with_context(|| format!("Failed to load manifest {}", config.manifest.display()))?;
    let registry = manifest.to_registry()?;

    let source_root = absolutize(&config.source_root)?;
    let build_root = absolutize(&config.build_root)?;
    log::debug!(
        "Source root: {}, build root: {}",
        source_root.display(),
        build_root.display()
    );

    let leading_args: Vec<OsString> = manifest
        .compiler_args
        .iter()
        .map(OsString::from)
        .collect();
    let program = select_compiler(config, &manifest);
    let timeout = match config.timeout {
        Some(timeout) => Some(timeout),
        None => manifest.timeout()?,
    };
    let executor = ProcessExecutor::new(&program)
        .with_leading_args(leading_args.clone())
        .with_timeout(timeout);

    let mut orchestrator = CompileOrchestrator::new(executor)
        .with_include_dirs(include_dirs(config, &manifest, &source_root))
        .with_jobs(config.jobs.or(manifest.jobs).unwrap_or(1));
    if let Some(base_dir) = base_dir(config, &manifest)? {
        orchestrator = orchestrator.with_base_dir(base_dir);
    }

    if config.dry_run {
        let jobs = orchestrator.plan(&registry, &source_root, &build_root)?;
        output::print_plan(&program, &leading_args, &jobs);
        return Ok(());
    }

    log::info!("Using shader compiler: {}", program.display());
    let report = orchestrator.run(&registry, &source_root, &build_root)?;
    output::print_report(&report);
    log::info!("Shader Forge finished");
    Ok(())
}

/// CLI flag, then manifest/environment, then discovery, then plain `glslc`.
fn select_compiler(config: &AppConfig, manifest: &Manifest) -> PathBuf {
    if let Some(program) = config.compiler.as_ref().or(manifest.compiler.as_ref()) {
        return program.clone();
    }
    if config.dry_run {
        return PathBuf::from(DEFAULT_COMPILER);
    }
    find_compiler().unwrap_or_else(|| {
        log::warn!("glslc not found on PATH or in VULKAN_SDK, trying '{DEFAULT_COMPILER}' anyway");
        PathBuf::from(DEFAULT_COMPILER)
    })
}

/// Manifest include dirs first, then CLI ones; relative entries resolve against the source root.
fn include_dirs(config: &AppConfig, manifest: &Manifest, source_root: &Path) -> Vec<PathBuf> {
    manifest
        .include_dirs
        .iter()
        .chain(&config.include_dirs)
        .map(|dir| {
            if dir.is_absolute() {
                dir.clone()
            } else {
                source_root.join(dir)
            }
        })
        .collect()
}

fn base_dir(config: &AppConfig, manifest: &Manifest) -> Result<Option<RelativePath>> {
    let declared = manifest.base_dir()?;
    let base = match (&config.base_dir, declared) {
        (Some(path), declared) => {
            let anchor = config
                .base_anchor
                .or_else(|| declared.as_ref().map(RelativePath::anchor))
                .unwrap_or(Anchor::Source);
            Some(RelativePath::parse(anchor, path).map_err(AppError::from)?)
        }
        (None, Some(declared)) => Some(match config.base_anchor {
            Some(anchor) => declared.rebased(anchor),
            None => declared,
        }),
        (None, None) => None,
    };
    Ok(base)
}

fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = env::current_dir().context("Failed to determine current directory")?;
    Ok(cwd.join(path))
}

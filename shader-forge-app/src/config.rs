use clap::{Parser, ValueEnum};
use shader_core::Anchor;
use std::path::PathBuf;
use std::time::Duration;

/// Log verbosity used when `RUST_LOG` is not set.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

/// Configuration for the Shader Forge command line.
///
/// Values given here override the matching manifest entries.
#[derive(Parser, Debug)]
#[command(name = "shader-forge", author, version, about, long_about = None)]
pub struct AppConfig {
    /// Path to the TOML manifest declaring the shader modules.
    #[arg(short, long, value_name = "FILE", env = "SHADER_FORGE_MANIFEST")]
    pub manifest: PathBuf,

    /// Project source root. Source-anchored paths resolve below it.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub source_root: PathBuf,

    /// Project build-output root. Compiled artifacts land below it.
    #[arg(long, value_name = "DIR", default_value = "build")]
    pub build_root: PathBuf,

    /// Base directory all module paths are relative to (overrides the manifest).
    #[arg(long, value_name = "PATH")]
    pub base_dir: Option<String>,

    /// Root the base directory is anchored to.
    #[arg(long, value_enum)]
    pub base_anchor: Option<Anchor>,

    /// Shader compiler executable. Defaults to glslc found on PATH or in VULKAN_SDK.
    #[arg(long, value_name = "PROGRAM")]
    pub compiler: Option<PathBuf>,

    /// Additional include directory (repeatable). Relative paths resolve against the source root.
    #[arg(short = 'I', long = "include", value_name = "DIR")]
    pub include_dirs: Vec<PathBuf>,

    /// Number of compiler processes to run in parallel.
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Kill a compiler process that runs longer than this (e.g., "30s", "500ms").
    #[arg(long, value_name = "DURATION", value_parser = humantime::parse_duration)]
    pub timeout: Option<Duration>,

    /// Print the compiler invocations without creating directories or running anything.
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Log level used when RUST_LOG is not set.
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

//! Shader manifest: the declarative list of modules plus task-wide settings.
//!
//! ```toml
//! base_dir = "debug"                # or { path = "gen", anchor = "output" }
//! include_dirs = ["common"]
//! compiler = "glslc"
//! compiler_args = ["--target-env=vulkan1.3"]
//! jobs = 4
//! timeout = "30s"
//!
//! [[modules]]
//! name = "ApplyVert"
//! source = "apply.vert"
//! output = "apply_vert.spv"
//! stage = "vertex"                  # optional, defaults to auto
//! ```
//!
//! `compiler`, `jobs` and `timeout` can also come from `SHADER_FORGE_*` environment variables.

use crate::error::AppError;
use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::Deserialize;
use shader_core::{Anchor, ConfigError, ModuleRegistry, RelativePath, ShaderStage};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Base directory declaration: a bare path (source-anchored) or a path with an explicit anchor.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum BaseDirDecl {
    Path(String),
    Anchored {
        path: String,
        #[serde(default)]
        anchor: Anchor,
    },
}

impl BaseDirDecl {
    /// # Errors
    ///
    /// `ConfigError::AbsolutePath` if the declared path is absolute.
    pub fn to_relative_path(&self) -> Result<RelativePath, ConfigError> {
        match self {
            Self::Path(path) => RelativePath::source(path),
            Self::Anchored { path, anchor } => RelativePath::parse(*anchor, path),
        }
    }
}

/// One `[[modules]]` entry. Missing paths are reported when the registry is validated.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ModuleDecl {
    pub name: String,
    pub source: Option<String>,
    pub output: Option<String>,
    #[serde(default)]
    pub stage: ShaderStage,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Manifest {
    pub base_dir: Option<BaseDirDecl>,
    #[serde(default)]
    pub include_dirs: Vec<PathBuf>,
    pub compiler: Option<PathBuf>,
    #[serde(default)]
    pub compiler_args: Vec<String>,
    pub jobs: Option<usize>,
    pub timeout: Option<String>,
    #[serde(default)]
    pub modules: Vec<ModuleDecl>,
}

/// Loads a manifest file, layering `SHADER_FORGE_COMPILER`, `SHADER_FORGE_JOBS`
/// and `SHADER_FORGE_TIMEOUT` on top.
///
/// # Errors
///
/// `AppError::ManifestNotFound` if `path` is not a file, `AppError::Manifest` on parse errors.
pub fn load_manifest(path: &Path) -> Result<Manifest, AppError> {
    if !path.is_file() {
        return Err(AppError::ManifestNotFound(path.to_path_buf()));
    }
    log::info!("Loading shader manifest from {}", path.display());

    let manifest: Manifest = Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed("SHADER_FORGE_").only(&["compiler", "jobs", "timeout"]))
        .extract()?;

    log::debug!(
        "Manifest declares {} module(s), base dir {:?}",
        manifest.modules.len(),
        manifest.base_dir
    );
    Ok(manifest)
}

impl Manifest {
    /// Builds the module registry in manifest order.
    ///
    /// # Errors
    ///
    /// `AppError::Config` for duplicate names, absolute module paths, or a module
    /// missing its source or output.
    pub fn to_registry(&self) -> Result<ModuleRegistry, AppError> {
        let mut registry = ModuleRegistry::new();
        for decl in &self.modules {
            let module = registry.declare(decl.name.as_str())?;
            if let Some(source) = &decl.source {
                module.set_source(RelativePath::source(source)?);
            }
            if let Some(output) = &decl.output {
                module.set_output(RelativePath::output(output)?);
            }
            module.set_stage(decl.stage);
        }
        registry.validate()?;
        Ok(registry)
    }

    /// # Errors
    ///
    /// `AppError::Config` if the declared base directory is absolute.
    pub fn base_dir(&self) -> Result<Option<RelativePath>, AppError> {
        let base_dir = self
            .base_dir
            .as_ref()
            .map(BaseDirDecl::to_relative_path)
            .transpose()?;
        Ok(base_dir)
    }

    /// # Errors
    ///
    /// `AppError::InvalidTimeout` if the timeout string is not a humantime duration.
    pub fn timeout(&self) -> Result<Option<Duration>, AppError> {
        self.timeout
            .as_deref()
            .map(|text| {
                humantime::parse_duration(text)
                    .map_err(|e| AppError::InvalidTimeout(text.to_string(), e))
            })
            .transpose()
    }
}

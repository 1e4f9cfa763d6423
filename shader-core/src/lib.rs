//! Core declaration model for build-time shader compilation.
//! Defines anchored relative paths, shader stages, modules and the module registry.
//! Nothing in this crate touches the filesystem or spawns processes.

use std::path::PathBuf;
use thiserror::Error;

/// Anchored relative paths and their resolution against project roots.
pub mod path;
/// Declared shader modules and the registry that owns them.
pub mod registry;
/// Shader pipeline stages and their compiler flags.
pub mod stage;

// Re-export core public items

/// Which project root a relative path is resolved against.
pub use crate::path::Anchor;
/// A path fragment anchored to the source or build-output root.
pub use crate::path::RelativePath;
/// Insertion-ordered collection of shader modules.
pub use crate::registry::ModuleRegistry;
/// A single declared compilation unit.
pub use crate::registry::ShaderModule;
/// Pipeline stage passed to the compiler.
pub use crate::stage::ShaderStage;

/// Configuration problems detected before any compiler process is spawned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A module with this name was already declared.
    #[error("Duplicate shader module name: {0}")]
    DuplicateModuleName(String),
    /// The module has no source path set.
    #[error("Shader module '{0}' has no source path")]
    MissingSource(String),
    /// The module has no output path set.
    #[error("Shader module '{0}' has no output path")]
    MissingOutput(String),
    /// No base directory was configured for the compile task.
    #[error("No base directory configured for the shader compile task")]
    MissingBaseDir,
    /// A relative path declaration was given as an absolute path.
    #[error("Expected a relative path but got absolute path '{0}'")]
    AbsolutePath(String),
    /// Include directories are handed to the compiler verbatim and must be absolute.
    #[error("Include directory must be absolute: {0:?}")]
    RelativeIncludeDir(PathBuf),
    /// The stage name is not one the compiler understands.
    #[error("Unknown shader stage '{0}'")]
    UnknownStage(String),
}

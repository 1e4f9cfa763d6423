use shader_core::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Manifest not found: {0:?}")]
    ManifestNotFound(PathBuf),

    #[error("Failed to read manifest: {0}")]
    Manifest(#[from] figment::Error),

    #[error("Invalid timeout '{0}': {1}")]
    InvalidTimeout(String, humantime::DurationError),

    #[error("Configuration Error: {0}")]
    Config(#[from] ConfigError),
}

//! Shader Forge Application Library
//!
//! Command line, manifest loading, logging and reporting around the
//! `shader-compile` orchestrator.

pub mod config;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod output;

// Include main.rs as a module
pub mod main;

pub use config::AppConfig;
pub use error::AppError;
pub use manifest::{load_manifest, Manifest};

// Re-export the main function so it can be called from the root crate
pub use crate::main::{main, run};

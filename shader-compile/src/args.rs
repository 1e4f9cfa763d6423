//! Compiler argument construction.
//!
//! The argument order is fixed so that identical inputs always produce identical
//! invocations:
//!
//! ```text
//! [-fshader-stage=<stage>] -I<base> [-I<include>...] -o<output> <source>
//! ```
//!
//! The stage flag is omitted for `ShaderStage::Auto`. Extra include directories
//! follow the base include root in insertion order.

use shader_core::ShaderStage;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Ordered set of include directories. Duplicates collapse, first insertion wins the position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncludeDirs {
    dirs: Vec<PathBuf>,
}

impl IncludeDirs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the directory was already present.
    pub fn insert(&mut self, dir: impl Into<PathBuf>) -> bool {
        let dir = dir.into();
        if self.dirs.contains(&dir) {
            return false;
        }
        self.dirs.push(dir);
        true
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathBuf> {
        self.dirs.iter()
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }
}

impl<P: Into<PathBuf>> FromIterator<P> for IncludeDirs {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        let mut dirs = Self::new();
        for dir in iter {
            dirs.insert(dir);
        }
        dirs
    }
}

impl<P: Into<PathBuf>> Extend<P> for IncludeDirs {
    fn extend<I: IntoIterator<Item = P>>(&mut self, iter: I) {
        for dir in iter {
            self.insert(dir);
        }
    }
}

/// Builds the full argument vector for one compiler invocation.
pub fn build_args(
    stage: ShaderStage,
    base_path: &Path,
    include_dirs: &IncludeDirs,
    output: &Path,
    source: &Path,
) -> Vec<OsString> {
    let mut args = Vec::with_capacity(4 + include_dirs.len());
    if let Some(flag) = stage.flag() {
        args.push(OsString::from(flag));
    }
    args.push(prefixed("-I", base_path));
    args.extend(include_dirs.iter().map(|dir| prefixed("-I", dir)));
    args.push(prefixed("-o", output));
    args.push(source.as_os_str().to_owned());
    args
}

/// `-I` and `-o` are passed glued to their value, matching glslc's short option form.
fn prefixed(flag: &str, path: &Path) -> OsString {
    let mut arg = OsString::from(flag);
    arg.push(path.as_os_str());
    arg
}

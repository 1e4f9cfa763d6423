use crate::ConfigError;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Selects which of the two project roots a [`RelativePath`] resolves against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Anchor {
    /// Resolved against the project's source root.
    #[default]
    Source,
    /// Resolved against the project's build-output root.
    Output,
}

impl Anchor {
    /// Short lowercase label used in `Display` output.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Output => "output",
        }
    }
}

/// An immutable path fragment anchored to either the source root or the build-output root.
///
/// Segments are stored already split. `.` and empty segments are dropped on parse,
/// `..` is kept as a literal segment and is never collapsed, so a resolved path may
/// still contain `..` components.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelativePath {
    anchor: Anchor,
    segments: Vec<String>,
}

impl RelativePath {
    /// The anchor root itself (no segments).
    pub const fn root(anchor: Anchor) -> Self {
        Self {
            anchor,
            segments: Vec::new(),
        }
    }

    /// Parses a `/` or `\` separated fragment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::AbsolutePath` if `text` is rooted or carries a drive prefix.
    pub fn parse(anchor: Anchor, text: &str) -> Result<Self, ConfigError> {
        if is_absolute(text) {
            return Err(ConfigError::AbsolutePath(text.to_string()));
        }
        let segments = text
            .split(['/', '\\'])
            .filter(|s| !s.is_empty() && *s != ".")
            .map(str::to_string)
            .collect();
        Ok(Self { anchor, segments })
    }

    /// Shorthand for a source-anchored [`RelativePath::parse`].
    ///
    /// # Errors
    ///
    /// See [`RelativePath::parse`].
    pub fn source(text: &str) -> Result<Self, ConfigError> {
        Self::parse(Anchor::Source, text)
    }

    /// Shorthand for an output-anchored [`RelativePath::parse`].
    ///
    /// # Errors
    ///
    /// See [`RelativePath::parse`].
    pub fn output(text: &str) -> Result<Self, ConfigError> {
        Self::parse(Anchor::Output, text)
    }

    pub const fn anchor(&self) -> Anchor {
        self.anchor
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Appends `child` to this path.
    ///
    /// The result always keeps `self`'s anchor; `child`'s anchor is ignored.
    #[must_use]
    pub fn compose(&self, child: &Self) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + child.segments.len());
        segments.extend(self.segments.iter().cloned());
        segments.extend(child.segments.iter().cloned());
        Self {
            anchor: self.anchor,
            segments,
        }
    }

    /// Same segments under a different anchor.
    #[must_use]
    pub fn rebased(&self, anchor: Anchor) -> Self {
        Self {
            anchor,
            segments: self.segments.clone(),
        }
    }

    /// Resolves against whichever root matches the anchor. Pure, performs no I/O.
    pub fn resolve(&self, source_root: &Path, output_root: &Path) -> PathBuf {
        let base = match self.anchor {
            Anchor::Source => source_root,
            Anchor::Output => output_root,
        };
        let mut resolved = base.to_path_buf();
        resolved.extend(&self.segments);
        resolved
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.anchor.label(), self.segments.join("/"))
    }
}

fn is_absolute(text: &str) -> bool {
    if text.starts_with(['/', '\\']) {
        return true;
    }
    // Windows drive prefix, e.g. `C:` or `C:\`
    let bytes = text.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_drops_empty_and_dot_segments() {
        let path = RelativePath::source("./shaders//debug/").unwrap();
        assert_eq!(path.segments(), ["shaders", "debug"]);
    }

    #[test]
    fn parse_keeps_parent_segments() {
        let path = RelativePath::source("a/../b").unwrap();
        assert_eq!(path.segments(), ["a", "..", "b"]);
    }

    #[test]
    fn parse_accepts_backslashes() {
        let path = RelativePath::output(r"debug\apply_vert.spv").unwrap();
        assert_eq!(path.segments(), ["debug", "apply_vert.spv"]);
    }

    #[test]
    fn parse_rejects_absolute() {
        assert_eq!(
            RelativePath::source("/etc/shaders"),
            Err(ConfigError::AbsolutePath("/etc/shaders".to_string()))
        );
        assert!(RelativePath::source(r"C:\shaders").is_err());
    }

    #[test]
    fn empty_text_is_root() {
        let path = RelativePath::output("").unwrap();
        assert!(path.is_root());
        assert_eq!(path, RelativePath::root(Anchor::Output));
    }

    #[test]
    fn compose_takes_left_anchor() {
        let base = RelativePath::source("debug").unwrap();
        let child = RelativePath::output("out.spv").unwrap();
        let composed = base.compose(&child);
        assert_eq!(composed.anchor(), Anchor::Source);
        assert_eq!(composed.segments(), ["debug", "out.spv"]);
        // Operands are untouched
        assert_eq!(base.segments(), ["debug"]);
        assert_eq!(child.anchor(), Anchor::Output);
    }

    #[test]
    fn resolve_picks_matching_root() {
        let src = RelativePath::source("debug/apply.vert").unwrap();
        let out = src.rebased(Anchor::Output);
        assert_eq!(
            src.resolve(Path::new("/proj"), Path::new("/proj/build")),
            PathBuf::from("/proj/debug/apply.vert")
        );
        assert_eq!(
            out.resolve(Path::new("/proj"), Path::new("/proj/build")),
            PathBuf::from("/proj/build/debug/apply.vert")
        );
    }

    #[test]
    fn display_shows_anchor() {
        let path = RelativePath::output("debug/a.spv").unwrap();
        assert_eq!(path.to_string(), "output:debug/a.spv");
    }
}

use crate::ConfigError;
#[cfg(feature = "serde")]
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Shader pipeline stage.
///
/// `Auto` leaves stage detection to the compiler, which infers it from the
/// source file extension.
///
/// With the `serde` feature, stages (de)serialize as their names and parse through
/// [`FromStr`], so declarations accept the same spellings as the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShaderStage {
    #[default]
    Auto,
    Vertex,
    Fragment,
    TessControl,
    TessEval,
    Geometry,
    Compute,
}

impl ShaderStage {
    /// Every stage, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Auto,
        Self::Vertex,
        Self::Fragment,
        Self::TessControl,
        Self::TessEval,
        Self::Geometry,
        Self::Compute,
    ];

    /// The `-fshader-stage=` argument for this stage, `None` for `Auto`.
    pub const fn flag(self) -> Option<&'static str> {
        match self {
            Self::Auto => None,
            Self::Vertex => Some("-fshader-stage=vertex"),
            Self::Fragment => Some("-fshader-stage=fragment"),
            Self::TessControl => Some("-fshader-stage=tesscontrol"),
            Self::TessEval => Some("-fshader-stage=tesseval"),
            Self::Geometry => Some("-fshader-stage=geometry"),
            Self::Compute => Some("-fshader-stage=compute"),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Vertex => "vertex",
            Self::Fragment => "fragment",
            Self::TessControl => "tesscontrol",
            Self::TessEval => "tesseval",
            Self::Geometry => "geometry",
            Self::Compute => "compute",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShaderStage {
    type Err = ConfigError;

    /// Accepts the long stage names and glslc's short file-extension forms.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "vertex" | "vert" => Ok(Self::Vertex),
            "fragment" | "frag" => Ok(Self::Fragment),
            "tesscontrol" | "tesc" => Ok(Self::TessControl),
            "tesseval" | "tese" => Ok(Self::TessEval),
            "geometry" | "geom" => Ok(Self::Geometry),
            "compute" | "comp" => Ok(Self::Compute),
            _ => Err(ConfigError::UnknownStage(s.to_string())),
        }
    }
}

#[cfg(feature = "serde")]
impl Serialize for ShaderStage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for ShaderStage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}

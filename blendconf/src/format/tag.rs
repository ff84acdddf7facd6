//! Format tags and extension inference.

use std::fmt;
use std::str::FromStr;

use camino::Utf8Path;
use clap::ValueEnum;

use crate::error::{BlendError, BlendResult};

/// Identifies a configuration format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum FormatTag {
    /// YAML documents (`.yaml`, `.yml`).
    #[value(alias = "yml")]
    Yaml,
    /// Flat `KEY=value` files (`.env`).
    Env,
    /// JSON documents (`.json`).
    Json,
    /// TOML documents (`.toml`).
    Toml,
}

impl FormatTag {
    /// Lowercase tag name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Env => "env",
            Self::Json => "json",
            Self::Toml => "toml",
        }
    }

    /// Display name used in diagnostics.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Yaml => "YAML",
            Self::Env => "ENV",
            Self::Json => "JSON",
            Self::Toml => "TOML",
        }
    }

    /// Parse a tag or file extension, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`BlendError::UnsupportedFormat`] for unknown names.
    pub fn parse(name: &str) -> BlendResult<Self> {
        match name.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "env" => Ok(Self::Env),
            "json" => Ok(Self::Json),
            "toml" => Ok(Self::Toml),
            _ => Err(BlendError::unsupported_format(name)),
        }
    }

    /// Infer the format from `path`'s extension, ignoring case.
    ///
    /// A bare `.env` file name counts as the ENV format.
    ///
    /// # Errors
    ///
    /// Returns [`BlendError::UnsupportedFormat`] when the extension is
    /// missing or unknown.
    ///
    /// # Examples
    ///
    /// ```
    /// use blendconf::FormatTag;
    /// use camino::Utf8Path;
    ///
    /// assert_eq!(FormatTag::from_path(Utf8Path::new("conf/base.YML"))?, FormatTag::Yaml);
    /// assert_eq!(FormatTag::from_path(Utf8Path::new(".env"))?, FormatTag::Env);
    /// assert!(FormatTag::from_path(Utf8Path::new("notes.txt")).is_err());
    /// # Ok::<_, blendconf::BlendError>(())
    /// ```
    pub fn from_path(path: &Utf8Path) -> BlendResult<Self> {
        if let Some(extension) = path.extension() {
            return Self::parse(extension);
        }
        match path.file_name() {
            Some(name) if name.eq_ignore_ascii_case(".env") => Ok(Self::Env),
            Some(name) => Err(BlendError::unsupported_format(name)),
            None => Err(BlendError::unsupported_format(path.as_str())),
        }
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormatTag {
    type Err = BlendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

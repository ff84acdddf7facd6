//! Inputs and outputs of a pipeline run.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::BlendResult;
use crate::format::FormatTag;

/// One input configuration file paired with its format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    path: Utf8PathBuf,
    format: FormatTag,
}

impl Source {
    /// Pair `path` with an explicit `format`.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>, format: FormatTag) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    /// Pair `path` with the format implied by its extension.
    ///
    /// # Errors
    ///
    /// Returns [`crate::BlendError::UnsupportedFormat`] when the extension is
    /// not recognised.
    pub fn infer(path: impl Into<Utf8PathBuf>) -> BlendResult<Self> {
        let owned: Utf8PathBuf = path.into();
        let format = FormatTag::from_path(&owned)?;
        Ok(Self {
            path: owned,
            format,
        })
    }

    /// Location of the source.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Format used to parse the source.
    #[must_use]
    pub const fn format(&self) -> FormatTag {
        self.format
    }
}

/// Where merged output is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Write to this file, replacing it.
    File(Utf8PathBuf),
    /// Write to standard output.
    Stdout,
}

impl OutputTarget {
    /// Token selecting standard output on the command line.
    pub const STDOUT_TOKEN: &'static str = "-";

    /// Returns the file path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Utf8Path> {
        match self {
            Self::File(path) => Some(path),
            Self::Stdout => None,
        }
    }
}

impl FromStr for OutputTarget {
    type Err = Infallible;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        Ok(if token == Self::STDOUT_TOKEN {
            Self::Stdout
        } else {
            Self::File(Utf8PathBuf::from(token))
        })
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{path}"),
            Self::Stdout => f.write_str(Self::STDOUT_TOKEN),
        }
    }
}

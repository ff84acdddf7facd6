//! Convenience constructors for `BlendError`.

use camino::Utf8Path;

use super::{BlendError, Position};

impl BlendError {
    /// Construct a parse error without positional information.
    ///
    /// # Examples
    ///
    /// ```
    /// use blendconf::BlendError;
    /// let err = BlendError::parse("base.yaml", "unexpected end of input");
    /// assert_eq!(
    ///     err.to_string(),
    ///     "failed to parse 'base.yaml': unexpected end of input"
    /// );
    /// ```
    #[must_use]
    pub fn parse(source_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            source_id: source_id.into(),
            position: None,
            reason: reason.into(),
        }
    }

    /// Construct a parse error pointing at `line` (and optionally `column`).
    #[must_use]
    pub fn parse_at(
        source_id: impl Into<String>,
        line: usize,
        column: Option<usize>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Parse {
            source_id: source_id.into(),
            position: Some(Position { line, column }),
            reason: reason.into(),
        }
    }

    /// Construct an [`BlendError::UnsupportedFormat`] for `format`.
    #[must_use]
    pub fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }

    /// Construct a [`BlendError::MissingFile`] for `path`.
    #[must_use]
    pub fn missing_file(path: &Utf8Path, source: std::io::Error) -> Self {
        Self::MissingFile {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Construct a [`BlendError::Write`] for `path`.
    #[must_use]
    pub fn write(path: &Utf8Path, source: std::io::Error) -> Self {
        Self::Write {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Construct a [`BlendError::Dump`] for the named format.
    #[must_use]
    pub fn dump(format: &'static str, reason: impl Into<String>) -> Self {
        Self::Dump {
            format,
            reason: reason.into(),
        }
    }

    /// Returns the source identifier for parse errors.
    #[must_use]
    pub fn source_id(&self) -> Option<&str> {
        match self {
            Self::Parse { source_id, .. } => Some(source_id),
            _ => None,
        }
    }
}

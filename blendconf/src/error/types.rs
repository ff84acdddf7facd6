//! Primary error enum for the blend pipeline.

use std::fmt;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Location of a parse failure inside a source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// One-based line number.
    pub line: usize,
    /// One-based column number, when the parser reports one.
    pub column: Option<usize>,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.column {
            Some(column) => write!(f, "line {}, column {column}", self.line),
            None => write!(f, "line {}", self.line),
        }
    }
}

/// Errors that abort a blend run.
///
/// None of these are recovered locally: the first error stops the pipeline
/// and is reported by the binary with a non-zero exit status.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BlendError {
    /// A source document is malformed.
    #[error("failed to parse '{source_id}'{}: {reason}", render_position(.position.as_ref()))]
    Parse {
        /// Path or label of the source that failed.
        source_id: String,
        /// Where the parser stopped, when known.
        position: Option<Position>,
        /// Human-readable explanation from the format parser.
        reason: String,
    },

    /// No adapter is registered for the requested format tag.
    #[error("unsupported file format '{format}'")]
    UnsupportedFormat {
        /// The tag or extension that was not recognised.
        format: String,
    },

    /// A source path could not be read.
    #[error("cannot read source '{path}': {source}")]
    MissingFile {
        /// Path that failed to open.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// `merge` was called without any documents.
    #[error("at least one source document is required")]
    EmptyInput,

    /// Output goes to standard output and no format was given to dump with.
    #[error("an output format must be specified when writing to standard output")]
    MissingOutputFormat,

    /// The serializer for the target format rejected the merged document.
    #[error("cannot write {format} output: {reason}")]
    Dump {
        /// Target format name.
        format: &'static str,
        /// Serializer message.
        reason: String,
    },

    /// Writing the merged output failed.
    #[error("failed to write '{path}': {source}")]
    Write {
        /// Destination that failed (`-` for standard output).
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

fn render_position(position: Option<&Position>) -> String {
    position.map_or_else(String::new, |pos| format!(" at {pos}"))
}

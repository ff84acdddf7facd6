//! Pipeline driver: load every source, merge, dump, write.
//!
//! Sources load strictly in order and the first failure aborts the run, so a
//! partially merged configuration is never written. A confirmation line is
//! printed only when the output goes to a file; when the merged document is
//! written to standard output it is the only thing written.

mod fs;
mod source;

use std::io::Write;

use camino::Utf8Path;
use tracing::debug;

use crate::document::Document;
use crate::error::{BlendError, BlendResult};
use crate::format::{AdapterRegistry, FormatTag};
use crate::merge::{MergeStrategy, merge};

pub use source::{OutputTarget, Source};

/// Everything a single run needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineRequest {
    /// Sources in precedence order; later sources win.
    pub sources: Vec<Source>,
    /// Strategy applied to the whole run.
    pub strategy: MergeStrategy,
    /// Destination of the merged document.
    pub output: OutputTarget,
    /// Output format; inferred from the output path when `None`.
    pub output_format: Option<FormatTag>,
}

impl PipelineRequest {
    /// Request writing `sources` merged with `strategy` to `output`.
    #[must_use]
    pub const fn new(sources: Vec<Source>, strategy: MergeStrategy, output: OutputTarget) -> Self {
        Self {
            sources,
            strategy,
            output,
            output_format: None,
        }
    }

    /// Set an explicit output format.
    #[must_use]
    pub const fn with_output_format(mut self, format: FormatTag) -> Self {
        self.output_format = Some(format);
        self
    }

    /// Resolve the output format, inferring it from the output path when no
    /// explicit format was given.
    ///
    /// # Errors
    ///
    /// Returns [`BlendError::MissingOutputFormat`] for standard output without
    /// an explicit format, or [`BlendError::UnsupportedFormat`] when the output
    /// extension is not recognised.
    pub fn resolve_output_format(&self) -> BlendResult<FormatTag> {
        match (self.output_format, &self.output) {
            (Some(format), _) => Ok(format),
            (None, OutputTarget::File(path)) => FormatTag::from_path(path),
            (None, OutputTarget::Stdout) => Err(BlendError::MissingOutputFormat),
        }
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of sources merged.
    pub sources: usize,
    /// Format the output was written in.
    pub output_format: FormatTag,
    /// Size of the rendered output in bytes.
    pub bytes_written: usize,
}

/// Execute `request`, writing merged output to `stdout` or to a file.
///
/// # Errors
///
/// Propagates the first load, merge, dump or write failure. Nothing is
/// written when loading or merging fails.
pub fn run<W: Write>(
    request: &PipelineRequest,
    registry: &AdapterRegistry,
    stdout: &mut W,
) -> BlendResult<RunSummary> {
    let output_format = request.resolve_output_format()?;
    let dumper = registry.adapter(output_format)?;
    let documents = load_sources(&request.sources, registry)?;
    let merged = merge(&documents, request.strategy)?;
    let rendered = dumper.dump(&merged)?;
    debug!(
        sources = documents.len(),
        strategy = %request.strategy,
        format = %output_format,
        destination = %request.output,
        "writing merged document"
    );

    match &request.output {
        OutputTarget::Stdout => {
            let stdout_path = Utf8Path::new(OutputTarget::STDOUT_TOKEN);
            stdout
                .write_all(rendered.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(|err| BlendError::write(stdout_path, err))?;
        }
        OutputTarget::File(path) => {
            fs::write_text(path, &rendered).map_err(|err| BlendError::write(path, err))?;
            writeln!(stdout, "Merged {} source(s) into {path}", documents.len())
                .map_err(|err| BlendError::write(path, err))?;
        }
    }

    Ok(RunSummary {
        sources: documents.len(),
        output_format,
        bytes_written: rendered.len(),
    })
}

/// Load every source in order, stopping at the first failure.
///
/// # Errors
///
/// Returns [`BlendError::MissingFile`] for unreadable paths,
/// [`BlendError::UnsupportedFormat`] for unregistered formats and
/// [`BlendError::Parse`] for malformed or non-UTF-8 contents.
pub fn load_sources(sources: &[Source], registry: &AdapterRegistry) -> BlendResult<Vec<Document>> {
    sources
        .iter()
        .map(|source| load_source(source, registry))
        .collect()
}

fn load_source(source: &Source, registry: &AdapterRegistry) -> BlendResult<Document> {
    let adapter = registry.adapter(source.format())?;
    let text = fs::read_text(source.path()).map_err(|err| read_error(source.path(), err))?;
    let document = adapter.load(source.path().as_str(), &text)?;
    debug!(
        path = %source.path(),
        format = %source.format(),
        kind = %document.kind(),
        "loaded source"
    );
    Ok(document)
}

/// Undecodable bytes are a parse failure; anything else means unreadable.
fn read_error(path: &Utf8Path, err: std::io::Error) -> BlendError {
    if err.kind() == std::io::ErrorKind::InvalidData {
        BlendError::parse(path.as_str(), "contents are not valid UTF-8")
    } else {
        BlendError::missing_file(path, err)
    }
}

#[cfg(test)]
mod tests;

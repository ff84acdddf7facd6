//! Command-line surface of the `blendconf` binary.
//!
//! [`Cli`] is the whole configuration of a run: arguments, their environment
//! fallbacks and defaults. It translates into a [`PipelineRequest`] plus the
//! [`EnvOptions`] used to build the adapter registry.

use camino::Utf8PathBuf;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::error::BlendResult;
use crate::format::{AdapterRegistry, EnvOptions, FormatTag};
use crate::merge::MergeStrategy;
use crate::pipeline::{OutputTarget, PipelineRequest, Source};

/// Merge configuration files into one document.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "blendconf",
    bin_name = "blendconf",
    about = "Merge YAML, ENV, JSON and TOML configuration sources",
    version
)]
pub struct Cli {
    /// Source files, merged in order; later files win.
    #[arg(value_name = "INPUT", required = true, num_args = 1..)]
    pub inputs: Vec<Utf8PathBuf>,

    /// How overlapping values are combined.
    #[arg(
        short = 's',
        long,
        value_enum,
        env = "BLENDCONF_STRATEGY",
        default_value_t = MergeStrategy::DeepMerge
    )]
    pub strategy: MergeStrategy,

    /// Output file, or `-` for standard output.
    #[arg(short = 'o', long, value_name = "PATH", default_value = OutputTarget::STDOUT_TOKEN)]
    pub output: OutputTarget,

    /// Output format; inferred from the output extension when omitted.
    #[arg(short = 'f', long, value_enum, ignore_case = true, value_name = "FORMAT")]
    pub output_format: Option<FormatTag>,

    /// Parse every input as this format instead of inferring it.
    #[arg(short = 'i', long, value_enum, ignore_case = true, value_name = "FORMAT")]
    pub input_format: Option<FormatTag>,

    /// Separator joining nested ENV keys.
    #[arg(
        long,
        value_name = "SEP",
        env = "BLENDCONF_ENV_SEPARATOR",
        default_value = "_"
    )]
    pub env_separator: String,

    /// Keep ENV key case instead of folding it.
    #[arg(long)]
    pub env_preserve_case: bool,

    /// Log debug output to stderr.
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl Cli {
    /// Build the pipeline request described by the arguments.
    ///
    /// # Errors
    ///
    /// Returns [`crate::BlendError::UnsupportedFormat`] when an input's format
    /// cannot be inferred and `--input-format` was not given.
    pub fn to_request(&self) -> BlendResult<PipelineRequest> {
        let sources = self
            .inputs
            .iter()
            .map(|path| match self.input_format {
                Some(format) => Ok(Source::new(path.clone(), format)),
                None => Source::infer(path.clone()),
            })
            .collect::<BlendResult<Vec<_>>>()?;
        Ok(PipelineRequest {
            sources,
            strategy: self.strategy,
            output: self.output.clone(),
            output_format: self.output_format,
        })
    }

    /// ENV conventions selected by the arguments.
    #[must_use]
    pub fn env_options(&self) -> EnvOptions {
        EnvOptions {
            separator: self.env_separator.clone(),
            lowercase: !self.env_preserve_case,
        }
    }

    /// Registry with the built-in adapters configured for this run.
    #[must_use]
    pub fn registry(&self) -> AdapterRegistry {
        AdapterRegistry::with_env_options(self.env_options())
    }
}

/// Install a stderr `tracing` subscriber.
///
/// `RUST_LOG` directives apply first; the level defaults to `warn`, or
/// `debug` when `verbose` is set.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(verbose: bool) -> Result<(), TryInitError> {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::from_default_env().add_directive(level.into());
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init()
}

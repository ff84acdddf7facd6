//! `blendconf` entry point: parse arguments, run the pipeline, report errors.

use std::io::Write;

use blendconf::cli::{Cli, init_logging};
use blendconf::run;
use clap::Parser;
use color_eyre::eyre::WrapErr;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_logging(cli.verbose).wrap_err("failed to initialise logging")?;
    execute(&cli)
}

fn execute(cli: &Cli) -> color_eyre::Result<()> {
    let request = cli.to_request()?;
    let registry = cli.registry();
    let mut stdout = std::io::stdout().lock();
    run(&request, &registry, &mut stdout)?;
    stdout.flush().wrap_err("failed to flush standard output")?;
    Ok(())
}

//! The render pipeline: discover, evaluate, extract, render.

use crate::cli::Cli;
use crate::config::{Config, OutputMode};
use crate::discover::{DiscoveryOptions, discover_sources};
use crate::error::Result;
use crate::evaluate::evaluate;
use crate::render::{Diagnostic, extract_plans, render_files, render_stream};
use std::io;

/// Run one render with the given command line.
///
/// Returns `Err` only for fatal errors. Instance and resource problems are
/// printed to stderr and leave the result `Ok`.
pub fn run(cli: Cli) -> Result<()> {
    let config = Config::resolve(cli.config.as_deref())?;
    let mode = cli.out.unwrap_or(config.out);
    let root = cli.source_root();

    let options = DiscoveryOptions {
        extension: config.extension.clone(),
        exclude: config.exclude_set()?,
    };
    let files = discover_sources(&root, &options)?;
    let evaluated = evaluate(&files)?;
    let plans = extract_plans(&evaluated);

    match mode {
        OutputMode::Stdout => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            render_stream(&plans, &mut out, print_diagnostic);
        }
        OutputMode::Files => render_files(&plans, &config.output_path(), print_diagnostic)?,
    }

    Ok(())
}

/// Print one diagnostic: problems to stderr, everything else to stdout.
fn print_diagnostic(diagnostic: Diagnostic) {
    if diagnostic.is_error() {
        eprintln!("{}", diagnostic);
    } else {
        println!("{}", diagnostic);
    }
}

//! cke: render configuration into Kubernetes-style YAML manifests.
//!
//! This is the main entry point for the `cke` CLI. It parses arguments,
//! runs the render pipeline, and maps fatal errors to exit codes.

use cke::cli::Cli;
use cke::{commands, exit_codes};
use std::process::ExitCode;

fn main() -> ExitCode {
    match Cli::parse_args().and_then(commands::run) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

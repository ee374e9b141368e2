//! CLI argument parsing for cke.
//!
//! Uses clap derive macros for declarative argument definitions.
//! The pipeline itself lives in the `commands` module.

use crate::config::OutputMode;
use crate::error::{CkeError, Result};
use clap::Parser;
use clap::error::ErrorKind;
use std::ffi::OsString;
use std::path::PathBuf;

/// cke: render configuration into Kubernetes-style YAML manifests.
///
/// Every resource (any value with an `apiVersion` field) found in the
/// configuration under PATH is validated and rendered, either as one
/// multi-document stream on stdout or as `[namespace-]kind-name.yaml` files
/// in `_rendered/`.
#[derive(Parser, Debug)]
#[command(name = "cke")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to search for configuration files.
    pub path: Option<PathBuf>,

    /// Output destination (default: `out` from the config file, else stdout).
    #[arg(long, value_enum)]
    pub out: Option<OutputMode>,

    /// Configuration file (default: ./.cke.yaml when present).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Result<Self> {
        Self::parse_args_from(std::env::args_os())
    }

    /// Parse `args`, mapping invalid usage to [`CkeError::Usage`].
    ///
    /// `--help` and `--version` are printed by clap, which then exits.
    pub fn parse_args_from<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Cli::try_parse_from(args).map_err(|err| match err.kind() {
            ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => err.exit(),
            _ => CkeError::Usage(
                err.to_string()
                    .trim_start_matches("error: ")
                    .trim_end()
                    .to_string(),
            ),
        })
    }

    /// Source root, defaulting to the current directory.
    pub fn source_root(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

//! Configuration types and defaults for cke.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Name of the configuration file looked up in the current directory.
pub const CONFIG_FILE_NAME: &str = ".cke.yaml";

/// Where rendered manifests go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// One multi-document YAML stream on standard output (default).
    #[default]
    Stdout,
    /// One file per resource in the output directory.
    Files,
}

// Default value functions for serde
pub(crate) fn default_output_dir() -> String {
    "_rendered".to_string()
}
pub(crate) fn default_extension() -> String {
    "cke".to_string()
}

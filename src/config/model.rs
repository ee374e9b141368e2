//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};

/// Configuration for a cke run.
///
/// This struct represents the contents of `.cke.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Output settings
    // =========================================================================
    /// Render mode used when `--out` is not given.
    #[serde(default)]
    pub out: OutputMode,

    /// Directory written in files mode, relative to the current directory.
    /// Must contain `_rendered` in its path.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    // =========================================================================
    // Source settings
    // =========================================================================
    /// Extension of configuration source files (no leading dot).
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Glob patterns, relative to the source root, of files to skip.
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            out: OutputMode::default(),
            output_dir: default_output_dir(),
            extension: default_extension(),
            exclude: Vec::new(),
        }
    }
}

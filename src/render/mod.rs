//! Rendering evaluated configuration into Kubernetes-style manifests.
//!
//! - [`extract_plans`] finds resource candidates and validates them.
//! - [`render_stream`] writes a multi-document YAML stream.
//! - [`render_files`] writes `[namespace-]kind-name.yaml` files.

mod files;
mod identity;
mod plan;
mod stream;


pub use files::{OUTPUT_DIR_MARKER, ensure_safe_output_dir, render_files};
pub use identity::ResourceIdentity;
pub use plan::{PlanEntry, PlanError, PlanOutcome, RESOURCE_MARKER, RenderPlan, extract_plans};
pub use stream::{DOCUMENT_SEPARATOR, render_stream};

use crate::engine::ValueError;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// A single resource could not be rendered.
#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("error getting resource {field}: {source}")]
    MissingField {
        field: &'static str,
        source: ValueError,
    },

    #[error("error encoding resource to YAML: {0}")]
    Encode(ValueError),

    #[error("error writing file {path}: {message}")]
    Write { path: PathBuf, message: String },

    #[error("error writing resource to output: {0}")]
    Output(String),
}

/// One line of user-facing output, reported as soon as it happens.
#[derive(Debug)]
pub enum Diagnostic {
    /// A manifest file was written.
    Created(PathBuf),
    /// An instance was skipped.
    PlanFailed { instance: String, error: PlanError },
    /// A resource candidate failed validation and was dropped.
    ResourceRejected { instance: String, error: PlanError },
    /// A single resource was skipped.
    ResourceSkipped {
        instance: String,
        error: ResourceError,
    },
    /// The output stream could not be flushed.
    Flush(String),
}

impl Diagnostic {
    /// Whether this diagnostic reports a problem.
    pub fn is_error(&self) -> bool {
        !matches!(self, Diagnostic::Created(_))
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Created(path) => write!(f, "Created: {}", path.display()),
            Diagnostic::PlanFailed { instance, error }
            | Diagnostic::ResourceRejected { instance, error } => {
                write!(f, "error: {}: {}", instance, error)
            }
            Diagnostic::ResourceSkipped { instance, error } => {
                write!(f, "error: {}: {}", instance, error)
            }
            Diagnostic::Flush(message) => write!(f, "error: failed to flush output: {}", message),
        }
    }
}

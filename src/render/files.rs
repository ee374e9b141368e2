//! Directory mode: one file per resource.

use super::identity::ResourceIdentity;
use super::plan::{PlanEntry, PlanOutcome, RenderPlan};
use super::{Diagnostic, ResourceError};
use crate::engine::Value;
use crate::error::{CkeError, Result};
use crate::fs::atomic_write;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Substring the output directory path must contain before it is cleared.
pub const OUTPUT_DIR_MARKER: &str = "_rendered";

/// Clear `output_dir` and write one file per accepted resource into it.
///
/// The directory is only touched if its path contains `_rendered`; anything
/// else is refused before deleting. Every written file and every
/// per-resource failure is passed to `report` as it happens; failures do not
/// stop the run. Files already written stay on disk if a later step fails.
pub fn render_files<F>(plans: &[RenderPlan<'_>], output_dir: &Path, mut report: F) -> Result<()>
where
    F: FnMut(Diagnostic),
{
    ensure_safe_output_dir(output_dir)?;
    reset_output_dir(output_dir)?;

    for plan in plans {
        let entries = match plan.outcome() {
            PlanOutcome::Failed(error) => {
                report(Diagnostic::PlanFailed {
                    instance: plan.instance.clone(),
                    error: error.clone(),
                });
                continue;
            }
            PlanOutcome::Entries(entries) => entries,
        };

        for entry in entries {
            let diagnostic = match entry {
                PlanEntry::Resource(resource) => match write_resource(resource, output_dir) {
                    Ok(path) => Diagnostic::Created(path),
                    Err(error) => Diagnostic::ResourceSkipped {
                        instance: plan.instance.clone(),
                        error,
                    },
                },
                PlanEntry::Rejected(error) => Diagnostic::ResourceRejected {
                    instance: plan.instance.clone(),
                    error: error.clone(),
                },
            };
            report(diagnostic);
        }
    }

    Ok(())
}

/// Refuse output paths that do not contain the `_rendered` marker.
pub fn ensure_safe_output_dir(output_dir: &Path) -> Result<()> {
    if output_dir.to_string_lossy().contains(OUTPUT_DIR_MARKER) {
        Ok(())
    } else {
        Err(CkeError::Output(format!(
            "output directory '{}' must contain '{}' in its path",
            output_dir.display(),
            OUTPUT_DIR_MARKER
        )))
    }
}

fn reset_output_dir(output_dir: &Path) -> Result<()> {
    match fs::remove_dir_all(output_dir) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => {
            return Err(CkeError::Output(format!(
                "failed to remove output directory '{}': {}",
                output_dir.display(),
                e
            )));
        }
    }
    fs::create_dir_all(output_dir).map_err(|e| {
        CkeError::Output(format!(
            "failed to create output directory '{}': {}",
            output_dir.display(),
            e
        ))
    })
}

fn write_resource(
    resource: &Value,
    output_dir: &Path,
) -> std::result::Result<PathBuf, ResourceError> {
    let identity = ResourceIdentity::of(resource)?;
    let path = output_dir.join(identity.file_name());
    let yaml = resource.to_yaml().map_err(ResourceError::Encode)?;
    atomic_write(&path, yaml.as_bytes()).map_err(|e| ResourceError::Write {
        path: path.clone(),
        message: e.to_string(),
    })?;
    Ok(path)
}

//! Stream mode: one multi-document YAML stream.

use super::plan::{PlanEntry, PlanOutcome, RenderPlan};
use super::{Diagnostic, ResourceError};
use std::io::Write;

/// Document separator written before every resource.
pub const DOCUMENT_SEPARATOR: &str = "---\n";

/// Write every accepted resource to `out` as `---` separated documents.
///
/// Failed plans, rejected candidates and resources that cannot be encoded or
/// written are passed to `report` in plan order, between the documents
/// around them; they never end up in the stream.
pub fn render_stream<W, F>(plans: &[RenderPlan<'_>], out: &mut W, mut report: F)
where
    W: Write,
    F: FnMut(Diagnostic),
{
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
            let resource = match entry {
                PlanEntry::Resource(resource) => resource,
                PlanEntry::Rejected(error) => {
                    report(Diagnostic::ResourceRejected {
                        instance: plan.instance.clone(),
                        error: error.clone(),
                    });
                    continue;
                }
            };

            let written = resource
                .to_yaml()
                .map_err(ResourceError::Encode)
                .and_then(|yaml| {
                    write!(out, "{}{}", DOCUMENT_SEPARATOR, yaml)
                        .and_then(|()| out.flush())
                        .map_err(|e| ResourceError::Output(e.to_string()))
                });
            if let Err(error) = written {
                report(Diagnostic::ResourceSkipped {
                    instance: plan.instance.clone(),
                    error,
                });
            }
        }
    }

    if let Err(e) = out.flush() {
        report(Diagnostic::Flush(e.to_string()));
    }
}

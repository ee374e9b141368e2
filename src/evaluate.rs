//! Evaluation of discovered source files.

use crate::engine::{Instance, ValueError, load_instances};
use crate::error::Result;
use std::path::PathBuf;

/// A loaded instance and the outcome of its eager YAML encode check.
#[derive(Debug)]
pub struct Evaluated {
    pub instance: Instance,
    /// `Err` when the whole instance could not be encoded to YAML.
    pub encode_check: std::result::Result<(), ValueError>,
}

/// Load `files` into instances and encode-check each one.
///
/// Load failures are fatal. An encode failure only marks its instance.
pub fn evaluate(files: &[PathBuf]) -> Result<Vec<Evaluated>> {
    let instances = load_instances(files)?;
    Ok(instances
        .into_iter()
        .map(|instance| {
            let encode_check = instance.value.to_yaml().map(|_| ());
            Evaluated {
                instance,
                encode_check,
            }
        })
        .collect())
}

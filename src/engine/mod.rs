//! Configuration evaluation engine.
//!
//! Source files are YAML documents extended with a few evaluation features:
//!
//! - Field labels: `name` (regular), `name?` (optional), `_name` (hidden),
//!   `#Name` (definition). Only regular fields are emitted and walked.
//! - Type constraints: `!string`, `!int`, `!float`, `!number`, `!bool`,
//!   `!null`, `!struct`, `!list`, `!any`.
//! - Defaults: `!default <value>`.
//! - References: `!ref path.to.value`, absolute from the instance root.
//!
//! All files of a directory form one instance and are unified in load order.
//! Conflicts do not abort loading; they surface as errors when a value is
//! validated or encoded.
//!
//! ```no_run
//! use cke::engine::{ValidateOptions, load_instances};
//! use std::path::PathBuf;
//!
//! let instances = load_instances(&[PathBuf::from("app/main.cke")])?;
//! for instance in &instances {
//!     instance.value.validate(&ValidateOptions::strict())?;
//!     print!("{}", instance.value.to_yaml()?);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod encode;
mod error;
mod load;
mod parse;
mod resolve;
mod unify;
mod validate;
mod value;

pub use error::{LoadError, ValidationFailure, ValueError};
pub use load::{Instance, load_instances};
pub use validate::ValidateOptions;
pub use value::{Field, Kind, Label, LabelKind, Value};

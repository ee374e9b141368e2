//! Value validation with configurable strictness.

use super::error::{ValidationFailure, ValueError};
use super::value::{LabelKind, Value, join_path};

/// Which checks a validation pass performs and which fields it visits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValidateOptions {
    /// Report type placeholders that were never narrowed to a value.
    pub concrete: bool,
    /// Report reference cycles.
    pub disallow_cycles: bool,
    /// Visit `_hidden` fields.
    pub hidden: bool,
    /// Visit `optional?` fields.
    pub optional: bool,
    /// Visit `#Definition` fields.
    pub definitions: bool,
}

impl ValidateOptions {
    /// The profile applied to resource candidates: everything checked,
    /// every field in scope.
    pub fn strict() -> Self {
        Self {
            concrete: true,
            disallow_cycles: true,
            hidden: true,
            optional: true,
            definitions: true,
        }
    }

    fn includes(&self, kind: LabelKind) -> bool {
        match kind {
            LabelKind::Regular => true,
            LabelKind::Optional => self.optional,
            LabelKind::Hidden => self.hidden,
            LabelKind::Definition => self.definitions,
        }
    }
}

impl Value {
    /// Validate this value and everything beneath it.
    ///
    /// Conflicts are always reported. Concreteness is not required inside
    /// optional fields and definitions, which describe schema rather than
    /// data.
    pub fn validate(&self, options: &ValidateOptions) -> Result<(), ValidationFailure> {
        let mut errors = Vec::new();
        check(self, "", options, options.concrete, &mut errors);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationFailure { errors })
        }
    }
}

fn check(
    value: &Value,
    path: &str,
    options: &ValidateOptions,
    require_concrete: bool,
    errors: &mut Vec<ValueError>,
) {
    match value {
        Value::Bottom(msg) => errors.push(ValueError::new(path, msg.clone())),
        Value::Cycle(target) => {
            if options.disallow_cycles {
                errors.push(ValueError::new(
                    path,
                    format!("reference cycle through \"{}\"", target),
                ));
            } else if require_concrete {
                errors.push(ValueError::new(path, "incomplete value (cycle)"));
            }
        }
        Value::Constraint(kind) => {
            if require_concrete {
                errors.push(ValueError::new(path, format!("incomplete value {}", kind)));
            }
        }
        Value::Default(inner) => check(inner, path, options, require_concrete, errors),
        Value::Ref { target, .. } => errors.push(ValueError::new(
            path,
            format!("unresolved reference \"{}\"", target.join(".")),
        )),
        Value::Struct(fields) => {
            for field in fields.iter().filter(|f| options.includes(f.label.kind)) {
                let concrete_here = require_concrete
                    && matches!(field.label.kind, LabelKind::Regular | LabelKind::Hidden);
                check(
                    &field.value,
                    &join_path(path, &field.label.to_string()),
                    options,
                    concrete_here,
                    errors,
                );
            }
        }
        Value::List(items) => {
            for (i, item) in items.iter().enumerate() {
                check(
                    item,
                    &join_path(path, &i.to_string()),
                    options,
                    require_concrete,
                    errors,
                );
            }
        }
        Value::Null | Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::String(_) => {}
    }
}

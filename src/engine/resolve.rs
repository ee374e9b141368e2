//! Reference resolution and default finalization.

use super::unify::unify;
use super::value::{Field, Value};
use std::borrow::Cow;

/// Replace every `Ref` under `root` by the value it points at.
///
/// References are absolute paths from the instance root. A reference that
/// reaches itself, directly or through other references, or that points at an
/// ancestor of the field holding it, resolves to `Value::Cycle`.
pub(super) fn resolve(root: &Value) -> Value {
    let mut resolver = Resolver {
        root,
        in_progress: Vec::new(),
    };
    resolver.resolve(root, &mut Vec::new())
}

/// Apply remaining defaults.
pub(super) fn finalize(value: Value) -> Value {
    match value {
        Value::Default(inner) => finalize(*inner),
        Value::Struct(fields) => Value::Struct(
            fields
                .into_iter()
                .map(|f| Field {
                    label: f.label,
                    value: finalize(f.value),
                })
                .collect(),
        ),
        Value::List(items) => Value::List(items.into_iter().map(finalize).collect()),
        other => other,
    }
}

struct Resolver<'a> {
    root: &'a Value,
    in_progress: Vec<Vec<String>>,
}

impl<'a> Resolver<'a> {
    fn resolve(&mut self, value: &Value, at: &mut Vec<String>) -> Value {
        match value {
            Value::Struct(fields) => {
                let mut resolved = Vec::with_capacity(fields.len());
                for field in fields {
                    at.push(field.label.to_string());
                    let value = self.resolve(&field.value, at);
                    at.pop();
                    resolved.push(Field {
                        label: field.label.clone(),
                        value,
                    });
                }
                Value::Struct(resolved)
            }
            Value::List(items) => {
                let mut resolved = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    at.push(i.to_string());
                    resolved.push(self.resolve(item, at));
                    at.pop();
                }
                Value::List(resolved)
            }
            Value::Default(inner) => Value::Default(Box::new(self.resolve(inner, at))),
            Value::Ref { target, with } => {
                let mut result = self.follow(target, at);
                for extra in with {
                    let extra = self.resolve(extra, at);
                    result = unify(result, extra);
                }
                result
            }
            other => other.clone(),
        }
    }

    fn follow(&mut self, target: &[String], at: &[String]) -> Value {
        let target_path = target.join(".");
        if at.starts_with(target) || self.in_progress.iter().any(|p| p == target) {
            return Value::Cycle(target_path);
        }

        self.in_progress.push(target.to_vec());
        let result = match self.lookup(target) {
            Some(found) => self.resolve(&found, &mut target.to_vec()),
            None => Value::Bottom(format!("reference \"{}\" not found", target_path)),
        };
        self.in_progress.pop();
        result
    }

    /// Find the raw value at `target`, resolving references met on the way.
    fn lookup(&mut self, target: &[String]) -> Option<Value> {
        let mut current: Cow<'a, Value> = Cow::Borrowed(self.root);
        for (i, segment) in target.iter().enumerate() {
            if matches!(current.as_ref(), Value::Ref { .. }) {
                let mut prefix = target[..i].to_vec();
                let resolved = self.resolve(current.as_ref(), &mut prefix);
                current = Cow::Owned(resolved);
            }
            current = match current {
                Cow::Borrowed(v) => Cow::Borrowed(v.child(segment)?),
                Cow::Owned(v) => Cow::Owned(v.child(segment)?.clone()),
            };
        }
        Some(current.into_owned())
    }
}

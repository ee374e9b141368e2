//! Unification: combining two partial values into one.
//!
//! Unification never fails outright. Incompatible values produce a
//! `Value::Bottom` carrying the conflict, which validation and encoding report
//! later with its path.

use super::value::{Field, Kind, LabelKind, Value};

/// Unify two values.
pub(super) fn unify(a: Value, b: Value) -> Value {
    match (a, b) {
        (Value::Bottom(msg), _) | (_, Value::Bottom(msg)) => Value::Bottom(msg),
        (Value::Constraint(Kind::Top), other) | (other, Value::Constraint(Kind::Top)) => other,
        (Value::Ref { target, mut with }, other) | (other, Value::Ref { target, mut with }) => {
            with.push(other);
            Value::Ref { target, with }
        }
        (Value::Cycle(path), _) | (_, Value::Cycle(path)) => Value::Cycle(path),
        (Value::Default(a), Value::Default(b)) => unify_defaults(*a, *b),
        (Value::Default(default), other) | (other, Value::Default(default)) => {
            apply_over_default(*default, other)
        }
        (Value::Constraint(a), Value::Constraint(b)) => match a.meet(b) {
            Some(kind) => Value::Constraint(kind),
            None => conflict(&Value::Constraint(a), &Value::Constraint(b)),
        },
        (Value::Constraint(kind), other) | (other, Value::Constraint(kind)) => {
            if kind.admits(other.kind()) {
                other
            } else {
                conflict(&Value::Constraint(kind), &other)
            }
        }
        (Value::Struct(a), Value::Struct(b)) => Value::Struct(unify_fields(a, b)),
        (Value::List(a), Value::List(b)) => {
            if a.len() != b.len() {
                return Value::Bottom(format!(
                    "incompatible list lengths ({} and {})",
                    a.len(),
                    b.len()
                ));
            }
            Value::List(a.into_iter().zip(b).map(|(x, y)| unify(x, y)).collect())
        }
        (a, b) => {
            if a == b {
                a
            } else {
                conflict(&a, &b)
            }
        }
    }
}

/// Merge struct fields. Field order follows first appearance.
fn unify_fields(mut fields: Vec<Field>, other: Vec<Field>) -> Vec<Field> {
    for incoming in other {
        match fields.iter().position(|f| f.label.name == incoming.label.name) {
            Some(i) => {
                let existing = &mut fields[i];
                if incoming.label.kind == LabelKind::Regular {
                    existing.label.kind = LabelKind::Regular;
                }
                let current = std::mem::replace(&mut existing.value, Value::Null);
                existing.value = unify(current, incoming.value);
            }
            None => fields.push(incoming),
        }
    }
    fields
}

/// Two defaults for the same value agree or cancel out.
fn unify_defaults(a: Value, b: Value) -> Value {
    if a == b {
        return Value::Default(Box::new(a));
    }
    match a.kind().meet(b.kind()) {
        Some(kind) => Value::Constraint(kind),
        None => conflict(&a, &b),
    }
}

/// A more specific value replaces a default of a compatible kind.
fn apply_over_default(default: Value, other: Value) -> Value {
    match other {
        Value::Constraint(kind) => {
            if kind.admits(default.kind()) {
                Value::Default(Box::new(default))
            } else {
                Value::Constraint(kind)
            }
        }
        Value::Struct(_) | Value::List(_) if default.kind() == other.kind() => {
            unify(default, other)
        }
        other if default.kind().meet(other.kind()).is_some() => other,
        other => conflict(&default, &other),
    }
}

fn conflict(a: &Value, b: &Value) -> Value {
    Value::Bottom(format!(
        "conflicting values {} and {}",
        a.describe(),
        b.describe()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::value::Label;

    fn s(v: &str) -> Value {
        Value::String(v.to_string())
    }

    fn st(fields: &[(&str, Value)]) -> Value {
        Value::Struct(
            fields
                .iter()
                .map(|(label, value)| Field {
                    label: Label::parse(label),
                    value: value.clone(),
                })
                .collect(),
        )
    }

    #[test]
    fn test_equal_scalars_unify() {
        assert_eq!(unify(s("web"), s("web")), s("web"));
        assert_eq!(unify(Value::Int(1), Value::Int(1)), Value::Int(1));
    }

    #[test]
    fn test_conflicting_scalars_become_bottom() {
        let v = unify(s("web"), s("api"));
        assert_eq!(
            v,
            Value::Bottom("conflicting values \"web\" and \"api\"".to_string())
        );
    }

    #[test]
    fn test_constraint_narrows_to_concrete() {
        assert_eq!(unify(Value::Constraint(Kind::String), s("web")), s("web"));
        assert_eq!(
            unify(Value::Int(3), Value::Constraint(Kind::Number)),
            Value::Int(3)
        );
        assert!(matches!(
            unify(Value::Constraint(Kind::Int), s("web")),
            Value::Bottom(_)
        ));
    }

    #[test]
    fn test_constraints_meet() {
        assert_eq!(
            unify(Value::Constraint(Kind::Number), Value::Constraint(Kind::Float)),
            Value::Constraint(Kind::Float)
        );
        assert!(matches!(
            unify(Value::Constraint(Kind::Bool), Value::Constraint(Kind::String)),
            Value::Bottom(_)
        ));
    }

    #[test]
    fn test_structs_merge_in_order() {
        let a = st(&[("name", s("web")), ("port?", Value::Constraint(Kind::Int))]);
        let b = st(&[("port", Value::Int(80)), ("image", s("nginx"))]);
        let merged = unify(a, b);
        assert_eq!(
            merged,
            st(&[
                ("name", s("web")),
                ("port", Value::Int(80)),
                ("image", s("nginx"))
            ])
        );
    }

    #[test]
    fn test_nested_conflict_is_local() {
        let a = st(&[("meta", st(&[("name", s("a")), ("ns", s("x"))]))]);
        let b = st(&[("meta", st(&[("name", s("b"))]))]);
        let merged = unify(a, b);
        assert!(matches!(merged.lookup("meta.name"), Some(Value::Bottom(_))));
        assert_eq!(merged.lookup("meta.ns"), Some(&s("x")));
    }

    #[test]
    fn test_list_length_mismatch() {
        let v = unify(
            Value::List(vec![Value::Int(1)]),
            Value::List(vec![Value::Int(1), Value::Int(2)]),
        );
        assert_eq!(
            v,
            Value::Bottom("incompatible list lengths (1 and 2)".to_string())
        );
    }

    #[test]
    fn test_concrete_value_overrides_default() {
        let d = Value::Default(Box::new(Value::Int(1)));
        assert_eq!(unify(d.clone(), Value::Int(5)), Value::Int(5));
        assert_eq!(unify(Value::Constraint(Kind::Int), d.clone()), d);
        assert!(matches!(unify(d, s("many")), Value::Bottom(_)));
    }

    #[test]
    fn test_different_defaults_cancel() {
        let v = unify(
            Value::Default(Box::new(s("a"))),
            Value::Default(Box::new(s("b"))),
        );
        assert_eq!(v, Value::Constraint(Kind::String));
    }

    #[test]
    fn test_ref_collects_unified_values() {
        let r = Value::Ref {
            target: vec!["x".to_string()],
            with: Vec::new(),
        };
        let v = unify(r, Value::Constraint(Kind::String));
        assert_eq!(
            v,
            Value::Ref {
                target: vec!["x".to_string()],
                with: vec![Value::Constraint(Kind::String)],
            }
        );
    }
}

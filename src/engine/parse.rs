//! Conversion from parsed YAML documents into unevaluated values.

use super::value::{Field, Kind, Label, Value, join_path, split_path};
use serde_yaml::Value as Yaml;

/// Convert one YAML node. `at` is the dotted path used in error messages.
///
/// Errors are `(path, message)` pairs; the loader attaches the file name.
pub(super) fn from_yaml(node: Yaml, at: &str) -> Result<Value, (String, String)> {
    match node {
        Yaml::Null => Ok(Value::Null),
        Yaml::Bool(b) => Ok(Value::Bool(b)),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Int(i))
            } else if let Some(x) = n.as_f64() {
                Ok(Value::Float(x))
            } else {
                Err((at.to_string(), format!("unsupported number {}", n)))
            }
        }
        Yaml::String(s) => Ok(Value::String(s)),
        Yaml::Sequence(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| from_yaml(item, &join_path(at, &i.to_string())))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::List),
        Yaml::Mapping(mapping) => {
            let mut fields = Vec::with_capacity(mapping.len());
            for (key, value) in mapping {
                let raw = key_to_label(&key)
                    .ok_or_else(|| (at.to_string(), "mapping keys must be scalars".to_string()))?;
                let label = Label::parse(&raw);
                let value = from_yaml(value, &join_path(at, &raw))?;
                fields.push(Field { label, value });
            }
            Ok(Value::Struct(fields))
        }
        Yaml::Tagged(tagged) => {
            let tag = tagged.tag.to_string();
            let tag = tag.trim_start_matches('!');
            from_tagged(tag, tagged.value, at)
        }
    }
}

fn from_tagged(tag: &str, inner: Yaml, at: &str) -> Result<Value, (String, String)> {
    match tag {
        "default" => Ok(Value::Default(Box::new(from_yaml(inner, at)?))),
        "ref" => match inner {
            Yaml::String(path) if !path.is_empty() && !path.split('.').any(str::is_empty) => {
                Ok(Value::Ref {
                    target: split_path(&path),
                    with: Vec::new(),
                })
            }
            _ => Err((
                at.to_string(),
                "!ref needs a dotted path such as `metadata.name`".to_string(),
            )),
        },
        _ => {
            let kind = Kind::from_tag(tag)
                .ok_or_else(|| (at.to_string(), format!("unknown tag !{}", tag)))?;
            match inner {
                Yaml::Null => Ok(Value::Constraint(kind)),
                Yaml::String(s) if s.is_empty() => Ok(Value::Constraint(kind)),
                _ => Err((at.to_string(), format!("!{} does not take a value", tag))),
            }
        }
    }
}

fn key_to_label(key: &Yaml) -> Option<String> {
    match key {
        Yaml::String(s) => Some(s.clone()),
        Yaml::Number(n) => Some(n.to_string()),
        Yaml::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

//! YAML encoding of evaluated values.

use super::error::ValueError;
use super::value::{LabelKind, Value, join_path};
use serde_yaml::{Mapping, Number, Value as Yaml};

impl Value {
    /// Encode the regular fields of this value as a YAML document.
    ///
    /// Fails on the first non-concrete value found.
    pub fn to_yaml(&self) -> Result<String, ValueError> {
        let doc = to_document(self, "")?;
        serde_yaml::to_string(&doc).map_err(|e| ValueError::new("", e.to_string()))
    }
}

fn to_document(value: &Value, path: &str) -> Result<Yaml, ValueError> {
    match value {
        Value::Null => Ok(Yaml::Null),
        Value::Bool(b) => Ok(Yaml::Bool(*b)),
        Value::Int(i) => Ok(Yaml::Number(Number::from(*i))),
        Value::Float(x) => Ok(Yaml::Number(Number::from(*x))),
        Value::String(s) => Ok(Yaml::String(s.clone())),
        Value::List(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| to_document(item, &join_path(path, &i.to_string())))
            .collect::<Result<Vec<_>, _>>()
            .map(Yaml::Sequence),
        Value::Struct(fields) => {
            let mut mapping = Mapping::new();
            for field in fields.iter().filter(|f| f.label.kind == LabelKind::Regular) {
                let encoded = to_document(&field.value, &join_path(path, &field.label.name))?;
                mapping.insert(Yaml::String(field.label.name.clone()), encoded);
            }
            Ok(Yaml::Mapping(mapping))
        }
        Value::Bottom(msg) => Err(ValueError::new(path, msg.clone())),
        Value::Cycle(target) => Err(ValueError::new(
            path,
            format!("reference cycle through \"{}\"", target),
        )),
        Value::Constraint(_) | Value::Default(_) | Value::Ref { .. } => Err(ValueError::new(
            path,
            format!("cannot encode incomplete value {}", value.describe()),
        )),
    }
}

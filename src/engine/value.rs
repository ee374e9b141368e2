//! Evaluated value tree: node types, path lookup and traversal.

use super::error::ValueError;
use std::fmt;

/// The kind of a value, used by type constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Any value (`!any`).
    Top,
    Null,
    Bool,
    Int,
    Float,
    /// Int or float (`!number`).
    Number,
    String,
    Struct,
    List,
}

impl Kind {
    /// Parse the name used by constraint tags (`!string`, `!int`, ...).
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "any" => Some(Self::Top),
            "null" => Some(Self::Null),
            "bool" => Some(Self::Bool),
            "int" => Some(Self::Int),
            "float" => Some(Self::Float),
            "number" => Some(Self::Number),
            "string" => Some(Self::String),
            "struct" => Some(Self::Struct),
            "list" => Some(Self::List),
            _ => None,
        }
    }

    /// Whether a value of kind `other` satisfies this kind.
    pub fn admits(self, other: Kind) -> bool {
        match self {
            Kind::Top => true,
            Kind::Number => matches!(other, Kind::Int | Kind::Float | Kind::Number),
            _ => self == other,
        }
    }

    /// The most specific kind satisfying both, if any.
    pub fn meet(self, other: Kind) -> Option<Kind> {
        if self.admits(other) {
            Some(other)
        } else if other.admits(self) {
            Some(self)
        } else {
            None
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Top => "_",
            Kind::Null => "null",
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Float => "float",
            Kind::Number => "number",
            Kind::String => "string",
            Kind::Struct => "struct",
            Kind::List => "list",
        };
        f.write_str(name)
    }
}

/// How a struct field participates in output and traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    /// Plain field: emitted and walked.
    Regular,
    /// `name?`: part of the schema only.
    Optional,
    /// `_name`: private to the configuration.
    Hidden,
    /// `#Name`: a reusable schema.
    Definition,
}

/// A struct field label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    /// Field name. Hidden and definition names keep their `_`/`#` prefix;
    /// optional names drop the trailing `?`.
    pub name: String,
    pub kind: LabelKind,
}

impl Label {
    /// Parse a label as written in a source file.
    pub fn parse(raw: &str) -> Self {
        let kind = if raw.starts_with('#') {
            LabelKind::Definition
        } else if raw.starts_with('_') {
            LabelKind::Hidden
        } else if raw.len() > 1 && raw.ends_with('?') {
            LabelKind::Optional
        } else {
            LabelKind::Regular
        };
        let name = match kind {
            LabelKind::Optional => raw.trim_end_matches('?').to_string(),
            _ => raw.to_string(),
        };
        Self { name, kind }
    }

    /// Whether a path segment selects this label.
    ///
    /// `name?` selects the optional field, a bare name selects anything else.
    pub fn matches_segment(&self, segment: &str) -> bool {
        match segment.strip_suffix('?') {
            Some(base) if segment.len() > 1 => {
                self.kind == LabelKind::Optional && self.name == base
            }
            _ => self.kind != LabelKind::Optional && self.name == segment,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            LabelKind::Optional => write!(f, "{}?", self.name),
            _ => f.write_str(&self.name),
        }
    }
}

/// A labelled struct member.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub label: Label,
    pub value: Value,
}

/// A node of an evaluated configuration tree.
///
/// After an instance is built, `Ref` and `Default` no longer occur; the other
/// non-concrete variants (`Constraint`, `Cycle`, `Bottom`) survive evaluation
/// and are reported by validation and encoding.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    /// Fields in order of first appearance.
    Struct(Vec<Field>),
    /// A type placeholder that no concrete value has narrowed.
    Constraint(Kind),
    /// A default to apply when nothing more specific is unified.
    Default(Box<Value>),
    /// An unresolved reference and the values unified with it so far.
    Ref { target: Vec<String>, with: Vec<Value> },
    /// A reference that leads back to itself.
    Cycle(String),
    /// A conflict or other evaluation error.
    Bottom(String),
}

impl Value {
    /// The kind of this value. Non-concrete placeholders report the kind
    /// they are constrained to.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Float(_) => Kind::Float,
            Value::String(_) => Kind::String,
            Value::List(_) => Kind::List,
            Value::Struct(_) => Kind::Struct,
            Value::Constraint(kind) => *kind,
            Value::Default(inner) => inner.kind(),
            Value::Ref { .. } | Value::Cycle(_) | Value::Bottom(_) => Kind::Top,
        }
    }

    /// Whether this node is itself a concrete value (children not checked).
    pub fn is_concrete(&self) -> bool {
        !matches!(
            self,
            Value::Constraint(_)
                | Value::Default(_)
                | Value::Ref { .. }
                | Value::Cycle(_)
                | Value::Bottom(_)
        )
    }

    /// Short human-readable rendering used in error messages.
    pub fn describe(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(x) => x.to_string(),
            Value::String(s) => format!("{:?}", s),
            Value::List(_) => "[...]".to_string(),
            Value::Struct(_) => "{...}".to_string(),
            Value::Constraint(kind) => kind.to_string(),
            Value::Default(inner) => format!("*{}", inner.describe()),
            Value::Ref { target, .. } => target.join("."),
            Value::Cycle(path) => format!("cycle({})", path),
            Value::Bottom(_) => "_|_".to_string(),
        }
    }

    /// The direct child selected by one path segment.
    pub fn child(&self, segment: &str) -> Option<&Value> {
        match self {
            Value::Struct(fields) => fields
                .iter()
                .find(|f| f.label.matches_segment(segment))
                .map(|f| &f.value),
            Value::List(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        }
    }

    /// Look up a value by dotted path (`metadata.name`, `spec.ports.0`).
    ///
    /// The empty path selects the value itself.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        split_path(path)
            .iter()
            .try_fold(self, |current, segment| current.child(segment))
    }

    /// Whether a value exists at `path`.
    pub fn exists(&self, path: &str) -> bool {
        self.lookup(path).is_some()
    }

    /// The concrete string at `path`.
    pub fn string_at(&self, path: &str) -> Result<&str, ValueError> {
        match self.lookup(path) {
            None => Err(ValueError::new(path, "field not found")),
            Some(Value::String(s)) => Ok(s.as_str()),
            Some(Value::Bottom(msg)) => Err(ValueError::new(path, msg.clone())),
            Some(v) if !v.is_concrete() => Err(ValueError::new(
                path,
                format!("incomplete value {}", v.describe()),
            )),
            Some(v) => Err(ValueError::new(
                path,
                format!(
                    "cannot use value {} (type {}) as string",
                    v.describe(),
                    v.kind()
                ),
            )),
        }
    }

    /// Depth-first pre-order traversal over regular fields and list
    /// elements.
    ///
    /// `visit` returns whether to descend into the node's children.
    pub fn walk<'a, F>(&'a self, visit: &mut F)
    where
        F: FnMut(&'a Value) -> bool,
    {
        if !visit(self) {
            return;
        }
        match self {
            Value::Struct(fields) => {
                for field in fields.iter().filter(|f| f.label.kind == LabelKind::Regular) {
                    field.value.walk(visit);
                }
            }
            Value::List(items) => {
                for item in items {
                    item.walk(visit);
                }
            }
            _ => {}
        }
    }
}

/// Split a dotted path into segments. The empty path has no segments.
pub fn split_path(path: &str) -> Vec<String> {
    if path.is_empty() {
        return Vec::new();
    }
    path.split('.').map(str::to_string).collect()
}

/// Join a path prefix and a segment for error reporting.
pub(crate) fn join_path(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{}.{}", prefix, segment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(label: &str, value: Value) -> Field {
        Field {
            label: Label::parse(label),
            value,
        }
    }

    fn sample() -> Value {
        Value::Struct(vec![
            field("kind", Value::String("Service".to_string())),
            field(
                "metadata",
                Value::Struct(vec![
                    field("name", Value::String("web".to_string())),
                    field("replicas", Value::Int(3)),
                    field("owner", Value::Constraint(Kind::String)),
                ]),
            ),
            field("ports", Value::List(vec![Value::Int(80), Value::Int(443)])),
            field("debug?", Value::Bool(true)),
            field("_secret", Value::String("hunter2".to_string())),
        ])
    }

    #[test]
    fn test_label_kinds() {
        assert_eq!(Label::parse("name").kind, LabelKind::Regular);
        assert_eq!(Label::parse("name?").kind, LabelKind::Optional);
        assert_eq!(Label::parse("name?").name, "name");
        assert_eq!(Label::parse("_name").kind, LabelKind::Hidden);
        assert_eq!(Label::parse("#Name").kind, LabelKind::Definition);
        assert_eq!(Label::parse("?").kind, LabelKind::Regular);
    }

    #[test]
    fn test_kind_meet() {
        assert_eq!(Kind::Number.meet(Kind::Int), Some(Kind::Int));
        assert_eq!(Kind::Float.meet(Kind::Number), Some(Kind::Float));
        assert_eq!(Kind::Top.meet(Kind::String), Some(Kind::String));
        assert_eq!(Kind::String.meet(Kind::Int), None);
    }

    #[test]
    fn test_lookup_nested_and_indexed() {
        let v = sample();
        assert_eq!(
            v.lookup("metadata.name"),
            Some(&Value::String("web".to_string()))
        );
        assert_eq!(v.lookup("ports.1"), Some(&Value::Int(443)));
        assert!(v.lookup("ports.2").is_none());
        assert!(v.lookup("metadata.namespace").is_none());
        assert_eq!(v.lookup(""), Some(&v));
    }

    #[test]
    fn test_lookup_optional_needs_question_mark() {
        let v = sample();
        assert!(!v.exists("debug"));
        assert_eq!(v.lookup("debug?"), Some(&Value::Bool(true)));
        assert!(v.exists("_secret"));
    }

    #[test]
    fn test_string_at_errors() {
        let v = sample();
        assert_eq!(v.string_at("kind").unwrap(), "Service");

        let err = v.string_at("metadata.namespace").unwrap_err();
        assert_eq!(err.to_string(), "metadata.namespace: field not found");

        let err = v.string_at("metadata.replicas").unwrap_err();
        assert!(err.to_string().contains("as string"));

        let err = v.string_at("metadata.owner").unwrap_err();
        assert!(err.to_string().contains("incomplete value string"));
    }

    #[test]
    fn test_walk_skips_non_regular_fields() {
        let v = sample();
        let mut strings = Vec::new();
        v.walk(&mut |node| {
            if let Value::String(s) = node {
                strings.push(s.clone());
            }
            true
        });
        assert_eq!(strings, vec!["Service", "web"]);
    }

    #[test]
    fn test_walk_stops_descending_when_told() {
        let v = sample();
        let mut visited = 0;
        v.walk(&mut |node| {
            visited += 1;
            !matches!(node, Value::Struct(fields) if fields.iter().any(|f| f.label.name == "name"))
        });
        // root, kind, metadata (not descended), ports, 80, 443
        assert_eq!(visited, 6);
    }
}

//! Resource identity and output file naming.

use super::ResourceError;
use crate::engine::Value;

/// `(kind, namespace, name)` of a resource, looked up when it is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceIdentity<'a> {
    pub kind: &'a str,
    /// Empty when the resource has no concrete `metadata.namespace`.
    pub namespace: &'a str,
    pub name: &'a str,
}

impl<'a> ResourceIdentity<'a> {
    /// Read the identity fields. `kind` and `metadata.name` are required.
    pub fn of(resource: &'a Value) -> Result<Self, ResourceError> {
        let kind = resource
            .string_at("kind")
            .map_err(|source| ResourceError::MissingField {
                field: "kind",
                source,
            })?;
        let namespace = resource.string_at("metadata.namespace").unwrap_or("");
        let name = resource
            .string_at("metadata.name")
            .map_err(|source| ResourceError::MissingField {
                field: "name",
                source,
            })?;
        Ok(Self {
            kind,
            namespace,
            name,
        })
    }

    /// Lower-cased `[namespace-]kind-name.yaml`.
    pub fn file_name(&self) -> String {
        let stem = if self.namespace.is_empty() {
            format!("{}-{}", self.kind, self.name)
        } else {
            format!("{}-{}-{}", self.namespace, self.kind, self.name)
        };
        format!("{}.yaml", stem).to_lowercase()
    }
}

//! Static type descriptors
//!
//! Every element type reports a [`TypeDescriptor`]: its name, namespace, base type
//! and, for composite types, the declared type and cardinality of each child.
//! Descriptors are plain `static` data so callers can introspect the model
//! without runtime reflection.

use serde::Serialize;

/// Type namespace, following the FHIRPath `System` / `FHIR` split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum TypeNamespace {
    System,
    #[serde(rename = "FHIR")]
    Fhir,
}

impl TypeNamespace {
    pub fn as_str(self) -> &'static str {
        match self {
            TypeNamespace::System => "System",
            TypeNamespace::Fhir => "FHIR",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TypeKind {
    PrimitiveType,
    ComplexType,
    BackboneElement,
    Resource,
}

/// How a field is laid out, both in memory and on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    /// Plain string carried as an XML attribute (`Element.id`, `Extension.url`).
    Attribute,
    /// Single composite child.
    Element,
    /// Repeating composite child.
    List,
    /// Single primitive, split into `name` / `_name` on the JSON wire.
    Primitive,
    /// Repeating primitive with positionally aligned `name` / `_name` arrays.
    PrimitiveList,
    /// Exactly one of several types, wire name suffixed with the chosen type.
    Choice,
    /// Inline resources without independent identity. No XML namespace.
    Contained,
    /// A single embedded resource (`Bundle.entry.resource`).
    Resource,
}

impl FieldKind {
    /// Whether the field can carry primitive values, and so a `_name` sibling.
    pub fn is_primitive(self) -> bool {
        matches!(self, FieldKind::Primitive | FieldKind::PrimitiveList)
    }
}

/// One named child of a composite type.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct ChildDescriptor {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Declared type names. Choice fields list every allowed type.
    pub types: &'static [&'static str],
    pub is_list: bool,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct TypeDescriptor {
    pub name: &'static str,
    pub namespace: TypeNamespace,
    pub base: Option<&'static str>,
    pub kind: TypeKind,
    /// Children in canonical order. Empty for system primitives.
    pub elements: &'static [ChildDescriptor],
}

impl TypeDescriptor {
    /// Namespace-qualified name, e.g. `FHIR.Patient` or `System.String`.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.namespace.as_str(), self.name)
    }

    pub fn is_resource(&self) -> bool {
        self.kind == TypeKind::Resource
    }

    pub fn is_primitive(&self) -> bool {
        self.kind == TypeKind::PrimitiveType
    }

    /// Look up a child by its logical name.
    pub fn child(&self, name: &str) -> Option<(usize, &ChildDescriptor)> {
        self.elements
            .iter()
            .enumerate()
            .find(|(_, child)| child.name == name)
    }
}

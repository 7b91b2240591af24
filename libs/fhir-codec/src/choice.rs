//! Wire-name resolution
//!
//! A wire key maps to one field of the enclosing type in one of three ways:
//! the field's own name, its `_`-prefixed duality sibling, or a choice variant
//! `logical + Capitalized(type)`. Exact field names are tried first.

use ferrum_element::{FieldKind, TypeDescriptor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct WireField {
    pub index: usize,
    pub kind: FieldKind,
    /// Selected type for choice fields.
    pub variant: Option<&'static str>,
    /// `_name` sibling carrying `id` / `extension`.
    pub metadata: bool,
}

pub(crate) fn resolve(descriptor: &'static TypeDescriptor, wire: &str) -> Option<WireField> {
    let (metadata, name) = match wire.strip_prefix('_') {
        Some(rest) => (true, rest),
        None => (false, wire),
    };

    if let Some((index, child)) = descriptor.child(name) {
        if child.kind == FieldKind::Choice || (metadata && !child.kind.is_primitive()) {
            return None;
        }
        return Some(WireField {
            index,
            kind: child.kind,
            variant: None,
            metadata,
        });
    }

    descriptor
        .elements
        .iter()
        .enumerate()
        .filter(|(_, child)| child.kind == FieldKind::Choice)
        .find_map(|(index, child)| {
            let suffix = name.strip_prefix(child.name)?;
            let variant = child
                .types
                .iter()
                .copied()
                .find(|type_name| suffix_matches(suffix, type_name))?;
            if metadata && !is_primitive_type(variant) {
                return None;
            }
            Some(WireField {
                index,
                kind: FieldKind::Choice,
                variant: Some(variant),
                metadata,
            })
        })
}

/// `effective` + `Period` → `effectivePeriod`, `value` + `dateTime` → `valueDateTime`.
pub(crate) fn wire_name(logical: &str, type_name: &str) -> String {
    let mut chars = type_name.chars();
    match chars.next() {
        Some(first) => format!("{logical}{}{}", first.to_ascii_uppercase(), chars.as_str()),
        None => logical.to_owned(),
    }
}

/// FHIR primitive type names start lower-case.
pub(crate) fn is_primitive_type(type_name: &str) -> bool {
    type_name.starts_with(|c: char| c.is_ascii_lowercase())
}

fn suffix_matches(suffix: &str, type_name: &str) -> bool {
    let mut suffix_chars = suffix.chars();
    let mut type_chars = type_name.chars();
    match (suffix_chars.next(), type_chars.next()) {
        (Some(s), Some(t)) => s == t.to_ascii_uppercase() && suffix_chars.as_str() == type_chars.as_str(),
        _ => false,
    }
}

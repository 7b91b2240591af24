//! XML → resource
//!
//! The document is parsed with `roxmltree`, then walked element by element.
//! Each child is dispatched by local name against the target's descriptor
//! table; attributes are checked against the fixed attribute set of the
//! element kind.

use ferrum_element::{
    AnyResource, ChoiceMut, Composite, Extension, FieldKind, FieldMut, PrimitiveElement, Resource,
    TypeRegistry,
};
use roxmltree::{Document, Node};
use tracing::trace;

use crate::choice::resolve;
use crate::contained::{expect_type, instantiate, store};
use crate::error::{FormatError, Result};
use crate::{FHIR_NS, XHTML_NS};

pub(crate) fn decode_any(source: &str, registry: &dyn TypeRegistry) -> Result<AnyResource> {
    let document = Document::parse(source)?;
    let root = document.root_element();
    decode_resource(source, root, registry)
}

pub(crate) fn decode_into(
    source: &str,
    target: &mut dyn Resource,
    registry: &dyn TypeRegistry,
) -> Result<()> {
    let document = Document::parse(source)?;
    let root = document.root_element();
    check_namespace(root, FHIR_NS)?;
    expect_type(target.resource_type(), root.tag_name().name())?;
    decode_resource_body(source, root, target, registry)
}

fn decode_resource(source: &str, node: Node<'_, '_>, registry: &dyn TypeRegistry) -> Result<AnyResource> {
    check_namespace(node, FHIR_NS)?;
    let mut resource = instantiate(registry, node.tag_name().name())?;
    decode_resource_body(source, node, &mut *resource, registry)?;
    Ok(resource)
}

fn decode_resource_body(
    source: &str,
    node: Node<'_, '_>,
    target: &mut dyn Resource,
    registry: &dyn TypeRegistry,
) -> Result<()> {
    // A resource element has no attributes of its own; `id` is a child.
    if let Some(attribute) = node.attributes().next() {
        return Err(FormatError::Attribute {
            element: node.tag_name().name().to_owned(),
            attribute: attribute.name().to_owned(),
        });
    }
    decode_composite(source, node, target.as_composite_mut(), registry)
}

fn decode_composite(
    source: &str,
    node: Node<'_, '_>,
    target: &mut dyn Composite,
    registry: &dyn TypeRegistry,
) -> Result<()> {
    let descriptor = target.type_descriptor();
    let type_name = descriptor.name;

    for attribute in node.attributes() {
        let field = descriptor
            .child(attribute.name())
            .filter(|(_, child)| attribute.namespace().is_none() && child.kind == FieldKind::Attribute);
        match field.map(|(index, _)| target.field_mut(index)) {
            Some(FieldMut::Attribute(slot)) => *slot = Some(attribute.value().to_owned()),
            _ => {
                return Err(FormatError::Attribute {
                    element: node.tag_name().name().to_owned(),
                    attribute: attribute.name().to_owned(),
                })
            }
        }
    }

    for child in node.children() {
        if !child.is_element() {
            check_ignorable(child, type_name)?;
            continue;
        }
        let name = child.tag_name().name();
        let wire = resolve(descriptor, name)
            .filter(|wire| !wire.metadata)
            .ok_or_else(|| FormatError::unknown_field(type_name, name))?;
        let declared = &descriptor.elements[wire.index];
        let namespace = if matches!(declared.types, ["xhtml"]) {
            XHTML_NS
        } else {
            FHIR_NS
        };
        check_namespace(child, namespace)?;
        trace!(type_name, field = name, "decoding XML element");

        match target.field_mut(wire.index) {
            FieldMut::Attribute(_) => {
                return Err(FormatError::structural(
                    type_name,
                    name,
                    "expected an attribute, found an element",
                ))
            }
            FieldMut::Element(slot) => {
                if slot.get().is_some() {
                    return Err(repeated(type_name, name));
                }
                decode_composite(source, child, slot.ensure(), registry)?;
            }
            FieldMut::List(list) => {
                decode_composite(source, child, list.push_default(), registry)?;
            }
            FieldMut::Primitive(slot) => {
                if slot.get().is_some() {
                    return Err(repeated(type_name, name));
                }
                decode_primitive(source, child, slot.ensure(), registry)?;
            }
            FieldMut::PrimitiveList(list) => {
                let index = list.len();
                list.ensure_len(index + 1);
                if let Some(primitive) = list.item_mut(index) {
                    decode_primitive(source, child, primitive, registry)?;
                }
                list.trim_empty();
            }
            FieldMut::Choice(slot) => {
                if slot.selected_type().is_some() {
                    return Err(FormatError::ChoiceConflict {
                        type_name,
                        field: declared.name,
                    });
                }
                let variant = wire
                    .variant
                    .ok_or_else(|| FormatError::unknown_field(type_name, name))?;
                match slot.select(variant) {
                    Some(ChoiceMut::Primitive(primitive)) => {
                        decode_primitive(source, child, primitive, registry)?;
                    }
                    Some(ChoiceMut::Element(element)) => {
                        decode_composite(source, child, element, registry)?;
                    }
                    None => return Err(FormatError::unknown_field(type_name, name)),
                }
            }
            FieldMut::Contained(slot) | FieldMut::Resource(slot) => {
                let inner = wrapped_resource(child, type_name)?;
                let resource = decode_resource(source, inner, registry)?;
                store(slot, resource, type_name, name)?;
            }
        }
    }
    Ok(())
}

/// `<name value=".." id=".."><extension .../></name>`, or for xhtml the
/// `<div>` element itself, kept verbatim.
fn decode_primitive(
    source: &str,
    node: Node<'_, '_>,
    primitive: &mut dyn PrimitiveElement,
    registry: &dyn TypeRegistry,
) -> Result<()> {
    let type_name = primitive.type_name();
    let element = node.tag_name().name();

    if type_name == "xhtml" {
        return primitive
            .set_lexical_value(&source[node.range()])
            .map_err(|err| FormatError::structural(type_name, element, err.to_string()));
    }

    for attribute in node.attributes() {
        match (attribute.namespace(), attribute.name()) {
            (None, "value") => primitive
                .set_lexical_value(attribute.value())
                .map_err(|err| FormatError::structural(type_name, element, err.to_string()))?,
            (None, "id") => primitive.set_id(Some(attribute.value().to_owned())),
            _ => {
                return Err(FormatError::Attribute {
                    element: element.to_owned(),
                    attribute: attribute.name().to_owned(),
                })
            }
        }
    }

    for child in node.children() {
        if !child.is_element() {
            check_ignorable(child, type_name)?;
            continue;
        }
        if child.tag_name().name() != "extension" {
            return Err(FormatError::unknown_field(type_name, child.tag_name().name()));
        }
        check_namespace(child, FHIR_NS)?;
        let mut extension = Extension::default();
        decode_composite(source, child, &mut extension, registry)?;
        primitive.extension_mut().push(extension);
    }

    // An empty primitive element would read as absent and hide a repeat.
    if primitive.is_empty() {
        return Err(FormatError::structural(
            type_name,
            element,
            "element has no value, id or extension",
        ));
    }
    Ok(())
}

/// The single resource element inside `<contained>` or `<resource>`.
fn wrapped_resource<'a, 'input>(
    wrapper: Node<'a, 'input>,
    type_name: &'static str,
) -> Result<Node<'a, 'input>> {
    let field = wrapper.tag_name().name();
    if let Some(attribute) = wrapper.attributes().next() {
        return Err(FormatError::Attribute {
            element: field.to_owned(),
            attribute: attribute.name().to_owned(),
        });
    }

    let mut inner = None;
    for child in wrapper.children() {
        if !child.is_element() {
            check_ignorable(child, type_name)?;
            continue;
        }
        if inner.replace(child).is_some() {
            return Err(FormatError::structural(
                type_name,
                field,
                "expected exactly one resource",
            ));
        }
    }
    inner.ok_or_else(|| FormatError::structural(type_name, field, "expected a resource"))
}

/// Comments and processing instructions are skipped; whitespace between
/// elements is formatting. Any other text is misplaced content.
fn check_ignorable(node: Node<'_, '_>, type_name: &'static str) -> Result<()> {
    match node.text() {
        Some(text) if node.is_text() && !text.trim().is_empty() => Err(FormatError::structural(
            type_name,
            "#text",
            format!("unexpected text content '{}'", text.trim()),
        )),
        _ => Ok(()),
    }
}

fn check_namespace(node: Node<'_, '_>, expected: &str) -> Result<()> {
    let found = node.tag_name().namespace();
    if found == Some(expected) {
        Ok(())
    } else {
        Err(FormatError::Namespace {
            element: node.tag_name().name().to_owned(),
            found: found.map(str::to_owned),
        })
    }
}

fn repeated(type_name: &'static str, field: &str) -> FormatError {
    FormatError::structural(type_name, field, "element repeated for a single-valued field")
}

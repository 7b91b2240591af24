//! JSON → resource
//!
//! The document is parsed into a `serde_json::Value` first; object members
//! keep their stream order and numbers keep their source text. Decoding then
//! dispatches each member by wire name against the target's descriptor table.

use ferrum_element::{
    AnyResource, ChoiceMut, Composite, Extension, FieldMut, PrimitiveElement, Resource,
    TypeRegistry,
};
use serde_json::{Map, Value};
use tracing::trace;

use crate::choice::{resolve, WireField};
use crate::contained::{expect_type, instantiate, store};
use crate::error::{FormatError, Result};

type Object = Map<String, Value>;

/// Decode a resource of whatever type its discriminator names.
pub(crate) fn decode_any(value: &Value, registry: &dyn TypeRegistry) -> Result<AnyResource> {
    let object = value.as_object().ok_or(FormatError::ExpectedObject)?;
    let mut resource = instantiate(registry, resource_type(object)?)?;
    decode_fields(object, resource.as_composite_mut(), registry)?;
    Ok(resource)
}

/// Decode into a caller-chosen resource type.
pub(crate) fn decode_into(
    value: &Value,
    target: &mut dyn Resource,
    registry: &dyn TypeRegistry,
) -> Result<()> {
    let object = value.as_object().ok_or(FormatError::ExpectedObject)?;
    expect_type(target.resource_type(), resource_type(object)?)?;
    decode_fields(object, target.as_composite_mut(), registry)
}

fn resource_type(object: &Object) -> Result<&str> {
    object
        .get("resourceType")
        .and_then(Value::as_str)
        .ok_or(FormatError::MissingResourceType)
}

fn decode_fields(
    object: &Object,
    target: &mut dyn Composite,
    registry: &dyn TypeRegistry,
) -> Result<()> {
    let descriptor = target.type_descriptor();
    let type_name = descriptor.name;

    for (key, value) in object {
        if key == "resourceType" && descriptor.is_resource() {
            continue;
        }
        let wire = resolve(descriptor, key)
            .ok_or_else(|| FormatError::unknown_field(type_name, key.as_str()))?;
        trace!(type_name, field = key.as_str(), "decoding JSON field");

        match target.field_mut(wire.index) {
            FieldMut::Attribute(slot) => {
                let text = value
                    .as_str()
                    .ok_or_else(|| FormatError::structural(type_name, key.as_str(), "expected a string"))?;
                *slot = Some(text.to_owned());
            }
            FieldMut::Element(slot) => {
                decode_fields(expect_object(type_name, key, value)?, slot.ensure(), registry)?;
            }
            FieldMut::List(list) => {
                for item in expect_array(type_name, key, value)? {
                    decode_fields(expect_object(type_name, key, item)?, list.push_default(), registry)?;
                }
            }
            FieldMut::Primitive(slot) => {
                decode_primitive(slot.ensure(), &wire, type_name, key, value, registry)?;
            }
            FieldMut::PrimitiveList(list) => {
                let items = expect_array(type_name, key, value)?;
                list.ensure_len(items.len());
                for (index, item) in items.iter().enumerate() {
                    if item.is_null() {
                        continue;
                    }
                    if let Some(primitive) = list.item_mut(index) {
                        decode_primitive(primitive, &wire, type_name, key, item, registry)?;
                    }
                }
                list.trim_empty();
            }
            FieldMut::Choice(slot) => {
                let field = descriptor.elements[wire.index].name;
                let variant = wire
                    .variant
                    .ok_or_else(|| FormatError::unknown_field(type_name, key.as_str()))?;
                if slot.selected_type().is_some_and(|current| current != variant) {
                    return Err(FormatError::ChoiceConflict { type_name, field });
                }
                match slot.select(variant) {
                    Some(ChoiceMut::Primitive(primitive)) => {
                        decode_primitive(primitive, &wire, type_name, key, value, registry)?;
                    }
                    Some(ChoiceMut::Element(element)) => {
                        decode_fields(expect_object(type_name, key, value)?, element, registry)?;
                    }
                    None => return Err(FormatError::unknown_field(type_name, key.as_str())),
                }
            }
            FieldMut::Contained(slot) => {
                for item in expect_array(type_name, key, value)? {
                    let resource = decode_any(item, registry)?;
                    store(slot, resource, type_name, key)?;
                }
            }
            FieldMut::Resource(slot) => {
                expect_object(type_name, key, value)?;
                let resource = decode_any(value, registry)?;
                store(slot, resource, type_name, key)?;
            }
        }
    }
    Ok(())
}

/// One side of the duality pair. Setting the value leaves metadata alone
/// and vice versa, so `name` and `_name` merge in either order.
fn decode_primitive(
    primitive: &mut dyn PrimitiveElement,
    wire: &WireField,
    type_name: &'static str,
    key: &str,
    value: &Value,
    registry: &dyn TypeRegistry,
) -> Result<()> {
    if wire.metadata {
        return decode_metadata(primitive, type_name, key, value, registry);
    }
    match value {
        Value::Object(_) | Value::Array(_) | Value::Null => Err(FormatError::structural(
            type_name,
            key,
            "expected a primitive value",
        )),
        _ => primitive
            .set_json_value(value)
            .map_err(|err| FormatError::structural(type_name, key, err.to_string())),
    }
}

fn decode_metadata(
    primitive: &mut dyn PrimitiveElement,
    type_name: &'static str,
    key: &str,
    value: &Value,
    registry: &dyn TypeRegistry,
) -> Result<()> {
    let mut carried = false;
    for (member, item) in expect_object(type_name, key, value)? {
        match member.as_str() {
            "id" => {
                let id = item
                    .as_str()
                    .ok_or_else(|| FormatError::structural(type_name, key, "expected a string id"))?;
                primitive.set_id(Some(id.to_owned()));
                carried = true;
            }
            "extension" => {
                for entry in expect_array(type_name, key, item)? {
                    let mut extension = Extension::default();
                    decode_fields(expect_object(type_name, key, entry)?, &mut extension, registry)?;
                    primitive.extension_mut().push(extension);
                    carried = true;
                }
            }
            _ => return Err(FormatError::unknown_field(primitive.type_name(), member.as_str())),
        }
    }
    if !carried {
        return Err(FormatError::structural(
            type_name,
            key,
            "metadata object has no id or extension",
        ));
    }
    Ok(())
}

fn expect_object<'v>(type_name: &'static str, key: &str, value: &'v Value) -> Result<&'v Object> {
    value
        .as_object()
        .ok_or_else(|| FormatError::structural(type_name, key, "expected an object"))
}

fn expect_array<'v>(type_name: &'static str, key: &str, value: &'v Value) -> Result<&'v Vec<Value>> {
    value
        .as_array()
        .ok_or_else(|| FormatError::structural(type_name, key, "expected an array"))
}

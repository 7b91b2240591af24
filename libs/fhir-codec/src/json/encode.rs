//! Resource → JSON
//!
//! Walks the descriptor table of each composite in canonical order. The
//! discriminator is written first for resources, then every present field.

use std::io::Write;

use ferrum_element::field::{FieldRef, PrimitiveList};
use ferrum_element::{ChoiceRef, Composite, PrimitiveElement, Resource};

use super::writer::JsonWriter;
use crate::choice::wire_name;
use crate::duality::{list_presence, metadata_key};
use crate::error::Result;

pub(crate) fn write_resource<W: Write>(out: &mut JsonWriter<W>, resource: &dyn Resource) -> Result<()> {
    out.begin_object()?;
    out.key("resourceType")?;
    out.string(resource.resource_type())?;
    write_fields(out, resource.as_composite())?;
    out.end_object()
}

fn write_composite<W: Write>(out: &mut JsonWriter<W>, element: &dyn Composite) -> Result<()> {
    out.begin_object()?;
    write_fields(out, element)?;
    out.end_object()
}

fn write_fields<W: Write>(out: &mut JsonWriter<W>, element: &dyn Composite) -> Result<()> {
    let descriptor = element.type_descriptor();
    for (index, child) in descriptor.elements.iter().enumerate() {
        match element.field(index) {
            FieldRef::Attribute(value) => {
                if let Some(value) = value {
                    out.key(child.name)?;
                    out.string(value)?;
                }
            }
            FieldRef::Element(slot) => {
                if let Some(value) = slot.get() {
                    out.key(child.name)?;
                    write_composite(out, value)?;
                }
            }
            FieldRef::List(list) => {
                if list.is_empty() {
                    continue;
                }
                out.key(child.name)?;
                out.begin_array()?;
                for item in (0..list.len()).filter_map(|index| list.item(index)) {
                    out.item()?;
                    write_composite(out, item)?;
                }
                out.end_array()?;
            }
            FieldRef::Primitive(slot) => {
                if let Some(primitive) = slot.get() {
                    write_primitive(out, child.name, primitive)?;
                }
            }
            FieldRef::PrimitiveList(list) => write_primitive_list(out, child.name, list)?,
            FieldRef::Choice(slot) => {
                let (Some(selected), Some(type_name)) = (slot.selected(), slot.selected_type()) else {
                    continue;
                };
                let wire = wire_name(child.name, type_name);
                match selected {
                    ChoiceRef::Primitive(primitive) => write_primitive(out, &wire, primitive)?,
                    ChoiceRef::Element(value) => {
                        out.key(&wire)?;
                        write_composite(out, value)?;
                    }
                }
            }
            FieldRef::Contained(slot) => {
                let resources = slot.resources();
                if resources.is_empty() {
                    continue;
                }
                out.key(child.name)?;
                out.begin_array()?;
                for resource in resources {
                    out.item()?;
                    write_resource(out, resource)?;
                }
                out.end_array()?;
            }
            FieldRef::Resource(slot) => {
                if let Some(resource) = slot.resources().into_iter().next() {
                    out.key(child.name)?;
                    write_resource(out, resource)?;
                }
            }
        }
    }
    Ok(())
}

fn write_primitive<W: Write>(
    out: &mut JsonWriter<W>,
    name: &str,
    primitive: &dyn PrimitiveElement,
) -> Result<()> {
    if let Some(value) = primitive.json_value() {
        out.key(name)?;
        out.value(&value)?;
    }
    if primitive.has_metadata() {
        out.key(&metadata_key(name))?;
        write_metadata(out, primitive)?;
    }
    Ok(())
}

fn write_metadata<W: Write>(out: &mut JsonWriter<W>, primitive: &dyn PrimitiveElement) -> Result<()> {
    out.begin_object()?;
    if let Some(id) = primitive.id() {
        out.key("id")?;
        out.string(id)?;
    }
    if !primitive.extension().is_empty() {
        out.key("extension")?;
        out.begin_array()?;
        for extension in primitive.extension() {
            out.item()?;
            write_composite(out, extension)?;
        }
        out.end_array()?;
    }
    out.end_object()
}

/// `name` and `_name` arrays, aligned to the same length with `null`
/// placeholders. A side with nothing to say is omitted entirely.
fn write_primitive_list<W: Write>(
    out: &mut JsonWriter<W>,
    name: &str,
    list: &dyn PrimitiveList,
) -> Result<()> {
    let presence = list_presence(list);
    if presence.values {
        out.key(name)?;
        out.begin_array()?;
        for index in 0..presence.len {
            out.item()?;
            match list.item(index).and_then(|item| item.json_value()) {
                Some(value) => out.value(&value)?,
                None => out.null()?,
            }
        }
        out.end_array()?;
    }
    if presence.metadata {
        out.key(&metadata_key(name))?;
        out.begin_array()?;
        for index in 0..presence.len {
            out.item()?;
            match list.item(index).filter(|item| item.has_metadata()) {
                Some(item) => write_metadata(out, item)?,
                None => out.null()?,
            }
        }
        out.end_array()?;
    }
    Ok(())
}

//! Resource → XML
//!
//! Element ids and `Extension.url` become attributes; primitives carry their
//! scalar in a `value` attribute and their extensions as child elements.
//! Repeating fields are repeated elements, so an empty list position has no
//! XML form and is dropped.

use std::io::Write;

use ferrum_element::field::FieldRef;
use ferrum_element::{ChoiceRef, Composite, PrimitiveElement, Resource};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::XmlOptions;
use crate::choice::wire_name;
use crate::error::{FormatError, Result};
use crate::FHIR_NS;

pub(crate) struct XmlEncoder<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> XmlEncoder<W> {
    pub(crate) fn new(inner: W, options: &XmlOptions) -> Self {
        let writer = if options.pretty {
            Writer::new_with_indent(inner, b' ', 2)
        } else {
            Writer::new(inner)
        };
        Self { writer }
    }

    pub(crate) fn write_document(&mut self, resource: &dyn Resource, options: &XmlOptions) -> Result<()> {
        if options.declaration {
            self.writer
                .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        }
        self.write_resource(resource, true)
    }

    pub(crate) fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    /// Contained resources inherit the namespace from the document and so
    /// omit the declaration.
    fn write_resource(&mut self, resource: &dyn Resource, declare_namespace: bool) -> Result<()> {
        let mut start = BytesStart::new(resource.resource_type());
        if declare_namespace {
            start.push_attribute(("xmlns", FHIR_NS));
        }
        self.write_element(start, resource.as_composite())
    }

    fn write_composite(&mut self, name: &str, element: &dyn Composite) -> Result<()> {
        self.write_element(BytesStart::new(name), element)
    }

    fn write_element(&mut self, mut start: BytesStart<'_>, element: &dyn Composite) -> Result<()> {
        let descriptor = element.type_descriptor();
        let mut has_children = false;
        for (index, child) in descriptor.elements.iter().enumerate() {
            match element.field(index) {
                FieldRef::Attribute(Some(value)) => start.push_attribute((child.name, value.as_str())),
                FieldRef::Attribute(None) => {}
                field => has_children |= field.is_present(),
            }
        }

        if !has_children {
            self.writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        let end = start.to_end().into_owned();
        self.writer.write_event(Event::Start(start))?;
        self.write_children(element)?;
        self.writer.write_event(Event::End(end))?;
        Ok(())
    }

    fn write_children(&mut self, element: &dyn Composite) -> Result<()> {
        let descriptor = element.type_descriptor();
        for (index, child) in descriptor.elements.iter().enumerate() {
            match element.field(index) {
                FieldRef::Attribute(_) => {}
                FieldRef::Element(slot) => {
                    if let Some(value) = slot.get() {
                        self.write_composite(child.name, value)?;
                    }
                }
                FieldRef::List(list) => {
                    for item in (0..list.len()).filter_map(|index| list.item(index)) {
                        self.write_composite(child.name, item)?;
                    }
                }
                FieldRef::Primitive(slot) => {
                    if let Some(primitive) = slot.get() {
                        self.write_primitive(child.name, primitive)?;
                    }
                }
                FieldRef::PrimitiveList(list) => {
                    for item in (0..list.len()).filter_map(|index| list.item(index)) {
                        if !item.is_empty() {
                            self.write_primitive(child.name, item)?;
                        }
                    }
                }
                FieldRef::Choice(slot) => {
                    let (Some(selected), Some(type_name)) = (slot.selected(), slot.selected_type()) else {
                        continue;
                    };
                    let wire = wire_name(child.name, type_name);
                    match selected {
                        ChoiceRef::Primitive(primitive) => self.write_primitive(&wire, primitive)?,
                        ChoiceRef::Element(value) => self.write_composite(&wire, value)?,
                    }
                }
                FieldRef::Contained(slot) => {
                    for resource in slot.resources() {
                        self.wrap(child.name, resource, false)?;
                    }
                }
                FieldRef::Resource(slot) => {
                    for resource in slot.resources() {
                        self.wrap(child.name, resource, true)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn wrap(&mut self, name: &str, resource: &dyn Resource, declare_namespace: bool) -> Result<()> {
        self.writer.write_event(Event::Start(BytesStart::new(name)))?;
        self.write_resource(resource, declare_namespace)?;
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    fn write_primitive(&mut self, name: &str, primitive: &dyn PrimitiveElement) -> Result<()> {
        if primitive.type_name() == "xhtml" {
            // The value is the serialized <div> itself; it has nowhere to
            // carry an id or extensions.
            if primitive.has_metadata() {
                return Err(FormatError::structural(
                    "xhtml",
                    name,
                    "id and extension on a narrative div cannot be written as XML",
                ));
            }
            if let Some(markup) = primitive.lexical_value() {
                self.writer
                    .write_event(Event::Text(BytesText::from_escaped(markup)))?;
            }
            return Ok(());
        }

        let mut start = BytesStart::new(name);
        if let Some(id) = primitive.id() {
            start.push_attribute(("id", id));
        }
        if let Some(value) = primitive.lexical_value() {
            start.push_attribute(("value", value.as_str()));
        }

        if primitive.extension().is_empty() {
            self.writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        self.writer.write_event(Event::Start(start))?;
        for extension in primitive.extension() {
            self.write_composite("extension", extension)?;
        }
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }
}

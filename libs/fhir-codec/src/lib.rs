//! FHIR JSON and XML codecs
//!
//! Encoders and decoders for the ferrum element tree. Both formats follow the
//! HL7 FHIR mapping rules:
//! - Resources carry their type as `resourceType` (JSON) or the root element
//!   name (XML).
//! - A primitive's value and its `id`/`extension` travel separately: `name`
//!   and `_name` in JSON, the `value` attribute and child elements in XML.
//! - Choice fields use the logical name suffixed with the chosen type
//!   (`effectivePeriod`).
//! - Contained resources are dispatched on their type name through a
//!   [`TypeRegistry`].
//!
//! Decoding is strict: unknown fields, a second variant for a choice field
//! and off-namespace XML are all errors, and no partially decoded resource
//! is ever returned.
//!
//! ```rust
//! use ferrum_codec::{from_json_str, to_json_string, to_xml_string};
//! use ferrum_element::{FhirBoolean, Patient};
//!
//! let patient = Patient {
//!     active: Some(FhirBoolean::new(true)),
//!     ..Default::default()
//! };
//!
//! let json = to_json_string(&patient).unwrap();
//! assert_eq!(json, r#"{"resourceType":"Patient","active":true}"#);
//! assert_eq!(from_json_str::<Patient>(&json).unwrap(), patient);
//!
//! let xml = to_xml_string(&patient).unwrap();
//! assert!(xml.ends_with(r#"<Patient xmlns="http://hl7.org/fhir"><active value="true"/></Patient>"#));
//! ```

mod choice;
mod contained;
mod duality;
pub mod error;
pub mod json;
pub mod xml;

use std::io::Write;

use ferrum_element::{AnyResource, Resource, StandardRegistry, TypeRegistry};
use tracing::debug;

pub use error::{FormatError, Result};
pub use json::{JsonOptions, JsonWriter};
pub use xml::XmlOptions;

pub const FHIR_NS: &str = "http://hl7.org/fhir";
pub const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";

/// Decodes against a caller-supplied registry.
///
/// The registry decides which resource types may appear at the top level, in
/// `contained` and in embedded resource fields.
#[derive(Clone, Copy)]
pub struct Decoder<'r> {
    registry: &'r dyn TypeRegistry,
}

impl<'r> Decoder<'r> {
    pub fn new(registry: &'r dyn TypeRegistry) -> Self {
        Self { registry }
    }

    /// Decoder over the resource types shipped with `ferrum-element`.
    pub fn standard() -> Decoder<'static> {
        Decoder {
            registry: &StandardRegistry,
        }
    }

    pub fn from_json_str<R: Resource + Default>(&self, input: &str) -> Result<R> {
        let value: serde_json::Value = serde_json::from_str(input)?;
        let mut resource = R::default();
        json::decode_into(&value, &mut resource, self.registry)?;
        debug!(resource_type = resource.resource_type(), "decoded JSON resource");
        Ok(resource)
    }

    pub fn from_json_slice<R: Resource + Default>(&self, input: &[u8]) -> Result<R> {
        let value: serde_json::Value = serde_json::from_slice(input)?;
        let mut resource = R::default();
        json::decode_into(&value, &mut resource, self.registry)?;
        debug!(resource_type = resource.resource_type(), "decoded JSON resource");
        Ok(resource)
    }

    /// Decode a resource of any registered type.
    pub fn from_json_str_any(&self, input: &str) -> Result<AnyResource> {
        let value: serde_json::Value = serde_json::from_str(input)?;
        let resource = json::decode_any(&value, self.registry)?;
        debug!(resource_type = resource.resource_type(), "decoded JSON resource");
        Ok(resource)
    }

    pub fn from_xml_str<R: Resource + Default>(&self, input: &str) -> Result<R> {
        let mut resource = R::default();
        xml::decode_into(input, &mut resource, self.registry)?;
        debug!(resource_type = resource.resource_type(), "decoded XML resource");
        Ok(resource)
    }

    /// Decode a resource of any registered type.
    pub fn from_xml_str_any(&self, input: &str) -> Result<AnyResource> {
        let resource = xml::decode_any(input, self.registry)?;
        debug!(resource_type = resource.resource_type(), "decoded XML resource");
        Ok(resource)
    }
}

impl std::fmt::Debug for Decoder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Decoder").finish_non_exhaustive()
    }
}

/// Encode `resource` as compact JSON.
pub fn to_json_string(resource: &dyn Resource) -> Result<String> {
    Ok(String::from_utf8(to_json_vec(resource)?)?)
}

pub fn to_json_string_pretty(resource: &dyn Resource) -> Result<String> {
    let mut buffer = Vec::new();
    to_json_writer(&mut buffer, resource, &JsonOptions::pretty())?;
    Ok(String::from_utf8(buffer)?)
}

pub fn to_json_vec(resource: &dyn Resource) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    to_json_writer(&mut buffer, resource, &JsonOptions::default())?;
    Ok(buffer)
}

pub fn to_json_writer<W: Write>(writer: W, resource: &dyn Resource, options: &JsonOptions) -> Result<()> {
    debug!(resource_type = resource.resource_type(), "encoding JSON resource");
    let mut out = JsonWriter::new(writer, options.pretty);
    json::write_resource(&mut out, resource)?;
    out.into_inner().flush()?;
    Ok(())
}

pub fn from_json_str<R: Resource + Default>(input: &str) -> Result<R> {
    Decoder::standard().from_json_str(input)
}

pub fn from_json_slice<R: Resource + Default>(input: &[u8]) -> Result<R> {
    Decoder::standard().from_json_slice(input)
}

pub fn from_json_str_any(input: &str) -> Result<AnyResource> {
    Decoder::standard().from_json_str_any(input)
}

/// Encode `resource` as a compact XML document with declaration.
pub fn to_xml_string(resource: &dyn Resource) -> Result<String> {
    let mut buffer = Vec::new();
    to_xml_writer(&mut buffer, resource, &XmlOptions::default())?;
    Ok(String::from_utf8(buffer)?)
}

pub fn to_xml_string_pretty(resource: &dyn Resource) -> Result<String> {
    let mut buffer = Vec::new();
    to_xml_writer(&mut buffer, resource, &XmlOptions::pretty())?;
    Ok(String::from_utf8(buffer)?)
}

pub fn to_xml_writer<W: Write>(writer: W, resource: &dyn Resource, options: &XmlOptions) -> Result<()> {
    debug!(resource_type = resource.resource_type(), "encoding XML resource");
    let mut encoder = xml::XmlEncoder::new(writer, options);
    encoder.write_document(resource, options)?;
    encoder.into_inner().flush()?;
    Ok(())
}

pub fn from_xml_str<R: Resource + Default>(input: &str) -> Result<R> {
    Decoder::standard().from_xml_str(input)
}

pub fn from_xml_str_any(input: &str) -> Result<AnyResource> {
    Decoder::standard().from_xml_str_any(input)
}

/// Convert a FHIR JSON document into pretty-printed XML.
///
/// The document is decoded into the typed model first, so unknown fields
/// and unknown resource types are rejected.
pub fn json_to_xml(input: &str) -> Result<String> {
    let resource = from_json_str_any(input)?;
    to_xml_string_pretty(&*resource)
}

/// Convert a FHIR XML document into pretty-printed JSON.
pub fn xml_to_json(input: &str) -> Result<String> {
    let resource = from_xml_str_any(input)?;
    to_json_string_pretty(&*resource)
}

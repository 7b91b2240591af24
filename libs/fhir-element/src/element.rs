//! Core element traits
//!
//! [`Element`] is the capability surface shared by every node in a resource
//! tree: named children, a type descriptor, equality and (refused by default)
//! value coercions. [`Composite`] adds indexed access to the field table that
//! the codecs walk.

use std::any::Any;
use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use rust_decimal::Decimal;

use crate::descriptor::{TypeDescriptor, TypeKind, TypeNamespace};
use crate::error::{Error, Result};
use crate::field::{FieldMut, FieldRef};
use crate::primitive::{PrimitiveElement, Scalar};

/// Static FHIR type name of a concrete element type.
pub trait TypeName {
    const TYPE_NAME: &'static str;
}

/// A present child produced by [`Element::children`].
#[derive(Debug, Clone, Copy)]
pub struct Child<'a> {
    /// Logical field name (`value` for `value[x]`).
    pub name: &'static str,
    pub element: &'a dyn Element,
}

/// Result of a successful quantity coercion.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantityValue {
    pub value: Decimal,
    pub unit: String,
}

pub trait Element: Any + fmt::Debug + Send + Sync {
    fn type_descriptor(&self) -> &'static TypeDescriptor;

    /// Present children in canonical field order.
    ///
    /// With `names`, only fields whose logical name is listed are visited; the
    /// canonical order is kept. Absent fields contribute nothing, list fields
    /// one entry per item. Every call builds a fresh sequence.
    fn children(&self, names: Option<&[&str]>) -> Vec<Child<'_>>;

    fn equal(&self, other: &dyn Element) -> bool;

    fn equivalent(&self, other: &dyn Element) -> bool;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Scalar value of a leaf. `None` for composites and value-less primitives.
    fn scalar(&self) -> Option<Scalar> {
        None
    }

    fn as_primitive(&self) -> Option<&dyn PrimitiveElement> {
        None
    }

    fn to_boolean(&self) -> Result<bool> {
        Err(Error::not_convertible(self.type_descriptor().name, "Boolean"))
    }

    fn to_string(&self) -> Result<String> {
        Err(Error::not_convertible(self.type_descriptor().name, "String"))
    }

    fn to_integer(&self) -> Result<i64> {
        Err(Error::not_convertible(self.type_descriptor().name, "Integer"))
    }

    fn to_decimal(&self) -> Result<Decimal> {
        Err(Error::not_convertible(self.type_descriptor().name, "Decimal"))
    }

    fn to_date(&self) -> Result<NaiveDate> {
        Err(Error::not_convertible(self.type_descriptor().name, "Date"))
    }

    fn to_time(&self) -> Result<NaiveTime> {
        Err(Error::not_convertible(self.type_descriptor().name, "Time"))
    }

    fn to_date_time(&self) -> Result<DateTime<FixedOffset>> {
        Err(Error::not_convertible(
            self.type_descriptor().name,
            "DateTime",
        ))
    }

    fn to_quantity(&self) -> Result<QuantityValue> {
        Err(Error::not_convertible(
            self.type_descriptor().name,
            "Quantity",
        ))
    }
}

/// An element backed by a field table.
///
/// `index` follows `type_descriptor().elements`; both are generated from the
/// same [`element_schema!`](crate::element_schema) declaration.
pub trait Composite: Element {
    fn field(&self, index: usize) -> FieldRef<'_>;

    fn field_mut(&mut self, index: usize) -> FieldMut<'_>;

    fn as_element(&self) -> &dyn Element;
}

static SYSTEM_STRING: TypeDescriptor = TypeDescriptor {
    name: "String",
    namespace: TypeNamespace::System,
    base: None,
    kind: TypeKind::PrimitiveType,
    elements: &[],
};

/// Attribute fields (`Element.id`, `Extension.url`) surface as `System.String`.
impl Element for String {
    fn type_descriptor(&self) -> &'static TypeDescriptor {
        &SYSTEM_STRING
    }

    fn children(&self, _names: Option<&[&str]>) -> Vec<Child<'_>> {
        Vec::new()
    }

    fn equal(&self, other: &dyn Element) -> bool {
        crate::equality::equal(self, other)
    }

    fn equivalent(&self, other: &dyn Element) -> bool {
        crate::equality::equivalent(self, other)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn scalar(&self) -> Option<Scalar> {
        Some(Scalar::String(self.clone()))
    }

    fn to_boolean(&self) -> Result<bool> {
        Scalar::String(self.clone()).to_boolean(SYSTEM_STRING.name)
    }

    fn to_string(&self) -> Result<String> {
        Ok(self.clone())
    }

    fn to_integer(&self) -> Result<i64> {
        Scalar::String(self.clone()).to_integer(SYSTEM_STRING.name)
    }

    fn to_decimal(&self) -> Result<Decimal> {
        Scalar::String(self.clone()).to_decimal(SYSTEM_STRING.name)
    }
}

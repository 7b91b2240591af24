//! Primitive wrappers
//!
//! A FHIR primitive carries an optional scalar value *and* its own element
//! metadata (`id`, `extension`). [`Primitive<K>`] stores both; the marker type
//! `K` fixes the FHIR type name and how the scalar is read from and written to
//! each wire format.
//!
//! A primitive with neither a value nor metadata is treated as absent
//! everywhere: slots hide it, traversal skips it, encoders never emit it.

use std::any::Any;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::datatypes::Extension;
use crate::descriptor::{ChildDescriptor, FieldKind, TypeDescriptor};
use crate::element::{Child, Element, QuantityValue, TypeName};
use crate::error::{Error, Result};

/// Scalar payload of a leaf element, as seen by equality and coercions.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Boolean(bool),
    Integer(i64),
    Decimal(Decimal),
    String(String),
}

impl Scalar {
    pub fn lexical(&self) -> String {
        match self {
            Scalar::Boolean(value) => value.to_string(),
            Scalar::Integer(value) => value.to_string(),
            Scalar::Decimal(value) => value.to_string(),
            Scalar::String(value) => value.clone(),
        }
    }

    pub(crate) fn to_boolean(&self, type_name: &'static str) -> Result<bool> {
        match self {
            Scalar::Boolean(value) => Ok(*value),
            Scalar::Integer(1) => Ok(true),
            Scalar::Integer(0) => Ok(false),
            Scalar::Decimal(value) if *value == Decimal::ONE => Ok(true),
            Scalar::Decimal(value) if value.is_zero() => Ok(false),
            Scalar::String(value) => match value.to_ascii_lowercase().as_str() {
                "true" | "t" | "yes" | "y" | "1" | "1.0" => Ok(true),
                "false" | "f" | "no" | "n" | "0" | "0.0" => Ok(false),
                _ => Err(Error::invalid_value(type_name, value.as_str())),
            },
            _ => Err(Error::invalid_value(type_name, self.lexical())),
        }
    }

    pub(crate) fn to_integer(&self, type_name: &'static str) -> Result<i64> {
        match self {
            Scalar::Integer(value) => Ok(*value),
            Scalar::Boolean(value) => Ok(i64::from(*value)),
            Scalar::String(value) => value
                .trim()
                .parse::<i64>()
                .map_err(|_| Error::invalid_value(type_name, value.as_str())),
            Scalar::Decimal(_) => Err(Error::not_convertible(type_name, "Integer")),
        }
    }

    pub(crate) fn to_decimal(&self, type_name: &'static str) -> Result<Decimal> {
        match self {
            Scalar::Decimal(value) => Ok(*value),
            Scalar::Integer(value) => Ok(Decimal::from(*value)),
            Scalar::Boolean(value) => Ok(if *value { Decimal::ONE } else { Decimal::ZERO }),
            Scalar::String(value) => Decimal::from_str(value.trim())
                .map_err(|_| Error::invalid_value(type_name, value.as_str())),
        }
    }

    pub(crate) fn to_quantity(&self, type_name: &'static str) -> Result<QuantityValue> {
        match self {
            Scalar::Boolean(_) => Err(Error::not_convertible(type_name, "Quantity")),
            _ => Ok(QuantityValue {
                value: self.to_decimal(type_name)?,
                unit: "1".to_owned(),
            }),
        }
    }
}

/// Marker describing one FHIR primitive type.
pub trait PrimitiveType: Default + Clone + fmt::Debug + PartialEq + Send + Sync + 'static {
    const NAME: &'static str;

    type Value: Clone + fmt::Debug + PartialEq + Send + Sync + 'static;

    fn descriptor() -> &'static TypeDescriptor;

    fn to_scalar(value: &Self::Value) -> Scalar;

    fn to_json(value: &Self::Value) -> Value;

    fn from_json(value: &Value) -> Result<Self::Value>;

    /// XML `value` attribute text.
    fn to_lexical(value: &Self::Value) -> String;

    fn from_lexical(text: &str) -> Result<Self::Value>;

    fn to_date(value: &Self::Value) -> Result<NaiveDate> {
        let _ = value;
        Err(Error::not_convertible(Self::NAME, "Date"))
    }

    fn to_time(value: &Self::Value) -> Result<NaiveTime> {
        let _ = value;
        Err(Error::not_convertible(Self::NAME, "Time"))
    }

    fn to_date_time(value: &Self::Value) -> Result<DateTime<FixedOffset>> {
        let _ = value;
        Err(Error::not_convertible(Self::NAME, "DateTime"))
    }
}

/// A primitive value together with its element metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive<K: PrimitiveType> {
    pub id: Option<String>,
    pub extension: Vec<Extension>,
    pub value: Option<K::Value>,
}

// Written by hand: a derive would demand `K::Value: Default`.
impl<K: PrimitiveType> Default for Primitive<K> {
    fn default() -> Self {
        Self {
            id: None,
            extension: Vec::new(),
            value: None,
        }
    }
}

impl<K: PrimitiveType> Primitive<K> {
    pub fn new(value: impl Into<K::Value>) -> Self {
        Self {
            id: None,
            extension: Vec::new(),
            value: Some(value.into()),
        }
    }

    /// A primitive that carries only extensions.
    pub fn from_extension(extension: Vec<Extension>) -> Self {
        Self {
            id: None,
            extension,
            value: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_extension(mut self, extension: Extension) -> Self {
        self.extension.push(extension);
        self
    }

    pub fn value(&self) -> Option<&K::Value> {
        self.value.as_ref()
    }
}

impl<K: PrimitiveType> TypeName for Primitive<K> {
    const TYPE_NAME: &'static str = K::NAME;
}

/// Object-safe view of a [`Primitive<K>`] used by the codecs.
pub trait PrimitiveElement: Element {
    fn type_name(&self) -> &'static str;

    fn id(&self) -> Option<&str>;

    fn set_id(&mut self, id: Option<String>);

    fn extension(&self) -> &[Extension];

    fn extension_mut(&mut self) -> &mut Vec<Extension>;

    fn has_value(&self) -> bool;

    fn has_metadata(&self) -> bool {
        self.id().is_some() || !self.extension().is_empty()
    }

    fn is_empty(&self) -> bool {
        !self.has_value() && !self.has_metadata()
    }

    fn json_value(&self) -> Option<Value>;

    fn set_json_value(&mut self, value: &Value) -> Result<()>;

    fn lexical_value(&self) -> Option<String>;

    fn set_lexical_value(&mut self, text: &str) -> Result<()>;

    fn as_element(&self) -> &dyn Element;
}

impl<K: PrimitiveType> PrimitiveElement for Primitive<K> {
    fn type_name(&self) -> &'static str {
        K::NAME
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }

    fn extension(&self) -> &[Extension] {
        &self.extension
    }

    fn extension_mut(&mut self) -> &mut Vec<Extension> {
        &mut self.extension
    }

    fn has_value(&self) -> bool {
        self.value.is_some()
    }

    fn json_value(&self) -> Option<Value> {
        self.value.as_ref().map(K::to_json)
    }

    fn set_json_value(&mut self, value: &Value) -> Result<()> {
        self.value = Some(K::from_json(value)?);
        Ok(())
    }

    fn lexical_value(&self) -> Option<String> {
        self.value.as_ref().map(K::to_lexical)
    }

    fn set_lexical_value(&mut self, text: &str) -> Result<()> {
        self.value = Some(K::from_lexical(text)?);
        Ok(())
    }

    fn as_element(&self) -> &dyn Element {
        self
    }
}

impl<K: PrimitiveType> Element for Primitive<K> {
    fn type_descriptor(&self) -> &'static TypeDescriptor {
        K::descriptor()
    }

    fn children(&self, names: Option<&[&str]>) -> Vec<Child<'_>> {
        let mut children = Vec::new();
        if crate::tree::wants(names, "id") {
            if let Some(id) = &self.id {
                children.push(Child {
                    name: "id",
                    element: id,
                });
            }
        }
        if crate::tree::wants(names, "extension") {
            children.extend(self.extension.iter().map(|extension| Child {
                name: "extension",
                element: extension as &dyn Element,
            }));
        }
        children
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
        self.value.as_ref().map(K::to_scalar)
    }

    fn as_primitive(&self) -> Option<&dyn PrimitiveElement> {
        Some(self)
    }

    fn to_boolean(&self) -> Result<bool> {
        self.require_scalar("Boolean")?.to_boolean(K::NAME)
    }

    fn to_string(&self) -> Result<String> {
        Ok(self.require_scalar("String")?.lexical())
    }

    fn to_integer(&self) -> Result<i64> {
        self.require_scalar("Integer")?.to_integer(K::NAME)
    }

    fn to_decimal(&self) -> Result<Decimal> {
        self.require_scalar("Decimal")?.to_decimal(K::NAME)
    }

    fn to_date(&self) -> Result<NaiveDate> {
        match &self.value {
            Some(value) => K::to_date(value),
            None => Err(Error::not_convertible(K::NAME, "Date")),
        }
    }

    fn to_time(&self) -> Result<NaiveTime> {
        match &self.value {
            Some(value) => K::to_time(value),
            None => Err(Error::not_convertible(K::NAME, "Time")),
        }
    }

    fn to_date_time(&self) -> Result<DateTime<FixedOffset>> {
        match &self.value {
            Some(value) => K::to_date_time(value),
            None => Err(Error::not_convertible(K::NAME, "DateTime")),
        }
    }

    fn to_quantity(&self) -> Result<QuantityValue> {
        self.require_scalar("Quantity")?.to_quantity(K::NAME)
    }
}

impl<K: PrimitiveType> Primitive<K> {
    fn require_scalar(&self, target: &'static str) -> Result<Scalar> {
        self.value
            .as_ref()
            .map(K::to_scalar)
            .ok_or(Error::not_convertible(K::NAME, target))
    }
}

pub(crate) static PRIMITIVE_CHILDREN: &[ChildDescriptor] = &[
    ChildDescriptor {
        name: "id",
        kind: FieldKind::Attribute,
        types: &["System.String"],
        is_list: false,
    },
    ChildDescriptor {
        name: "extension",
        kind: FieldKind::List,
        types: &["Extension"],
        is_list: true,
    },
];

macro_rules! primitive_descriptor {
    ($name:literal) => {
        fn descriptor() -> &'static TypeDescriptor {
            static DESCRIPTOR: TypeDescriptor = TypeDescriptor {
                name: $name,
                namespace: crate::descriptor::TypeNamespace::Fhir,
                base: Some("PrimitiveType"),
                kind: crate::descriptor::TypeKind::PrimitiveType,
                elements: PRIMITIVE_CHILDREN,
            };
            &DESCRIPTOR
        }
    };
}

/// String-valued primitive kinds share one representation on both wires.
macro_rules! string_primitive {
    ($(#[$meta:meta])* $kind:ident, $alias:ident, $name:literal $(, { $($extra:tt)* })?) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub struct $kind;

        impl PrimitiveType for $kind {
            const NAME: &'static str = $name;

            type Value = String;

            primitive_descriptor!($name);

            fn to_scalar(value: &String) -> Scalar {
                Scalar::String(value.clone())
            }

            fn to_json(value: &String) -> Value {
                Value::String(value.clone())
            }

            fn from_json(value: &Value) -> Result<String> {
                value
                    .as_str()
                    .map(str::to_owned)
                    .ok_or_else(|| Error::invalid_value($name, value.to_string()))
            }

            fn to_lexical(value: &String) -> String {
                value.clone()
            }

            fn from_lexical(text: &str) -> Result<String> {
                Ok(text.to_owned())
            }

            $($($extra)*)?
        }

        pub type $alias = Primitive<$kind>;
    };
}

string_primitive!(StringKind, FhirString, "string", {
    fn to_date(value: &String) -> Result<NaiveDate> {
        parse_date("string", value)
    }

    fn to_time(value: &String) -> Result<NaiveTime> {
        parse_time("string", value)
    }

    fn to_date_time(value: &String) -> Result<DateTime<FixedOffset>> {
        parse_date_time("string", value)
    }
});
string_primitive!(CodeKind, FhirCode, "code");
string_primitive!(IdKind, FhirId, "id");
string_primitive!(UriKind, FhirUri, "uri");
string_primitive!(CanonicalKind, FhirCanonical, "canonical");
string_primitive!(MarkdownKind, FhirMarkdown, "markdown");
string_primitive!(DateKind, FhirDate, "date", {
    fn to_date(value: &String) -> Result<NaiveDate> {
        parse_date("date", value)
    }

    fn to_date_time(value: &String) -> Result<DateTime<FixedOffset>> {
        parse_date_time("date", value)
    }
});
string_primitive!(DateTimeKind, FhirDateTime, "dateTime", {
    fn to_date(value: &String) -> Result<NaiveDate> {
        parse_date("dateTime", value)
    }

    fn to_date_time(value: &String) -> Result<DateTime<FixedOffset>> {
        parse_date_time("dateTime", value)
    }
});
string_primitive!(InstantKind, FhirInstant, "instant", {
    fn to_date(value: &String) -> Result<NaiveDate> {
        parse_date("instant", value)
    }

    fn to_date_time(value: &String) -> Result<DateTime<FixedOffset>> {
        parse_date_time("instant", value)
    }
});
string_primitive!(TimeKind, FhirTime, "time", {
    fn to_time(value: &String) -> Result<NaiveTime> {
        parse_time("time", value)
    }
});
string_primitive!(
    /// XHTML narrative. The value is the serialized `<div>` fragment.
    XhtmlKind,
    FhirXhtml,
    "xhtml"
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BooleanKind;

impl PrimitiveType for BooleanKind {
    const NAME: &'static str = "boolean";

    type Value = bool;

    primitive_descriptor!("boolean");

    fn to_scalar(value: &bool) -> Scalar {
        Scalar::Boolean(*value)
    }

    fn to_json(value: &bool) -> Value {
        Value::Bool(*value)
    }

    fn from_json(value: &Value) -> Result<bool> {
        value
            .as_bool()
            .ok_or_else(|| Error::invalid_value(Self::NAME, value.to_string()))
    }

    fn to_lexical(value: &bool) -> String {
        value.to_string()
    }

    fn from_lexical(text: &str) -> Result<bool> {
        match text {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(Error::invalid_value(Self::NAME, text)),
        }
    }
}

pub type FhirBoolean = Primitive<BooleanKind>;

macro_rules! integer_primitive {
    ($kind:ident, $alias:ident, $name:literal, $ty:ty, $min:expr) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub struct $kind;

        impl PrimitiveType for $kind {
            const NAME: &'static str = $name;

            type Value = $ty;

            primitive_descriptor!($name);

            fn to_scalar(value: &$ty) -> Scalar {
                Scalar::Integer(i64::from(*value))
            }

            fn to_json(value: &$ty) -> Value {
                Value::from(*value)
            }

            fn from_json(value: &Value) -> Result<$ty> {
                value
                    .as_i64()
                    .filter(|number| *number >= $min)
                    .and_then(|number| <$ty>::try_from(number).ok())
                    .ok_or_else(|| Error::invalid_value($name, value.to_string()))
            }

            fn to_lexical(value: &$ty) -> String {
                value.to_string()
            }

            fn from_lexical(text: &str) -> Result<$ty> {
                text.parse::<i64>()
                    .ok()
                    .filter(|number| *number >= $min)
                    .and_then(|number| <$ty>::try_from(number).ok())
                    .ok_or_else(|| Error::invalid_value($name, text))
            }
        }

        pub type $alias = Primitive<$kind>;
    };
}

integer_primitive!(IntegerKind, FhirInteger, "integer", i32, i64::from(i32::MIN));
integer_primitive!(PositiveIntKind, FhirPositiveInt, "positiveInt", u32, 1);
integer_primitive!(UnsignedIntKind, FhirUnsignedInt, "unsignedInt", u32, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecimalKind;

impl PrimitiveType for DecimalKind {
    const NAME: &'static str = "decimal";

    type Value = Decimal;

    primitive_descriptor!("decimal");

    fn to_scalar(value: &Decimal) -> Scalar {
        Scalar::Decimal(*value)
    }

    /// Emitted with its original scale, so `1.50` stays `1.50`.
    fn to_json(value: &Decimal) -> Value {
        let text = value.to_string();
        match serde_json::Number::from_str(&text) {
            Ok(number) => Value::Number(number),
            Err(_) => value.to_f64().map(Value::from).unwrap_or(Value::Null),
        }
    }

    fn from_json(value: &Value) -> Result<Decimal> {
        match value {
            Value::Number(number) => parse_decimal(&number.to_string()),
            _ => Err(Error::invalid_value(Self::NAME, value.to_string())),
        }
    }

    fn to_lexical(value: &Decimal) -> String {
        value.to_string()
    }

    fn from_lexical(text: &str) -> Result<Decimal> {
        parse_decimal(text)
    }
}

pub type FhirDecimal = Primitive<DecimalKind>;

fn parse_decimal(text: &str) -> Result<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|_| Error::invalid_value("decimal", text))
}

/// Partial dates (`2020`, `2020-03`) resolve to the first day of the period.
fn parse_date(type_name: &'static str, text: &str) -> Result<NaiveDate> {
    let date = text.split('T').next().unwrap_or(text);
    let parsed = match date.len() {
        4 => date
            .parse::<i32>()
            .ok()
            .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1)),
        7 => NaiveDate::parse_from_str(&format!("{date}-01"), "%Y-%m-%d").ok(),
        _ => NaiveDate::parse_from_str(date, "%Y-%m-%d").ok(),
    };
    parsed.ok_or_else(|| Error::invalid_value(type_name, text))
}

fn parse_time(type_name: &'static str, text: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(text, "%H:%M:%S%.f")
        .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M"))
        .map_err(|_| Error::invalid_value(type_name, text))
}

/// Date-only values resolve to midnight UTC.
fn parse_date_time(type_name: &'static str, text: &str) -> Result<DateTime<FixedOffset>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Ok(parsed);
    }
    if text.contains('T') {
        return Err(Error::invalid_value(type_name, text));
    }
    let utc = FixedOffset::east_opt(0).ok_or_else(|| Error::invalid_value(type_name, text))?;
    parse_date(type_name, text)?
        .and_hms_opt(0, 0, 0)
        .and_then(|naive| naive.and_local_timezone(utc).single())
        .ok_or_else(|| Error::invalid_value(type_name, text))
}

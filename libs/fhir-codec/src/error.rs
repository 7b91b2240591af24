//! Codec errors
//!
//! Every error is terminal for the call that produced it. Decoders build into
//! a local value and only hand it out on success, so a failed decode never
//! leaks a partially populated resource.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("expected a JSON object for the resource")]
    ExpectedObject,

    #[error("missing resourceType property")]
    MissingResourceType,

    #[error("{type_name}.{field}: {message}")]
    StructuralToken {
        type_name: &'static str,
        field: String,
        message: String,
    },

    #[error("unknown field '{field}' for type {type_name}")]
    UnknownField {
        type_name: &'static str,
        field: String,
    },

    #[error("unknown resource type '{0}'")]
    UnknownDiscriminator(String),

    #[error("expected resource type {expected}, found {found}")]
    UnexpectedResourceType {
        expected: &'static str,
        found: String,
    },

    #[error("{type_name}.{field}: multiple values for field")]
    ChoiceConflict {
        type_name: &'static str,
        field: &'static str,
    },

    #[error("element <{element}> has namespace {found:?}, expected the FHIR namespace")]
    Namespace {
        element: String,
        found: Option<String>,
    },

    #[error("unexpected attribute '{attribute}' on <{element}>")]
    Attribute { element: String, attribute: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("XML write error: {0}")]
    XmlWrite(#[from] quick_xml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl FormatError {
    pub(crate) fn structural(
        type_name: &'static str,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        FormatError::StructuralToken {
            type_name,
            field: field.into(),
            message: message.into(),
        }
    }

    pub(crate) fn unknown_field(type_name: &'static str, field: impl Into<String>) -> Self {
        FormatError::UnknownField {
            type_name,
            field: field.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FormatError>;

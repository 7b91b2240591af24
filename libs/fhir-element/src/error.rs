//! Error types for the element model

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("{type_name} is not convertible to {target}")]
    NotConvertible {
        type_name: &'static str,
        target: &'static str,
    },

    #[error("Invalid {type_name} value: {value}")]
    InvalidValue {
        type_name: &'static str,
        value: String,
    },
}

impl Error {
    pub(crate) fn not_convertible(type_name: &'static str, target: &'static str) -> Self {
        Error::NotConvertible { type_name, target }
    }

    pub(crate) fn invalid_value(type_name: &'static str, value: impl Into<String>) -> Self {
        Error::InvalidValue {
            type_name,
            value: value.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

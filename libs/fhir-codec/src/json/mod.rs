//! JSON backend

mod decode;
mod encode;
mod writer;

pub(crate) use decode::{decode_any, decode_into};
pub(crate) use encode::write_resource;
pub use writer::JsonWriter;

/// Encoder settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonOptions {
    /// Two-space indentation and one member per line.
    pub pretty: bool,
}

impl JsonOptions {
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

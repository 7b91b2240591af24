//! XML backend

mod decode;
mod encode;

pub(crate) use decode::{decode_any, decode_into};
pub(crate) use encode::XmlEncoder;

/// Encoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XmlOptions {
    /// Two-space indentation, one element per line.
    pub pretty: bool,
    /// Write an `<?xml version="1.0" encoding="UTF-8"?>` declaration.
    pub declaration: bool,
}

impl Default for XmlOptions {
    fn default() -> Self {
        Self {
            pretty: false,
            declaration: true,
        }
    }
}

impl XmlOptions {
    pub fn pretty() -> Self {
        Self {
            pretty: true,
            ..Self::default()
        }
    }
}

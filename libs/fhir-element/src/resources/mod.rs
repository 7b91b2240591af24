//! Resource types
//!
//! The `Resource`/`DomainResource` header fields are repeated in every
//! declaration so that each type's field table is complete and ordered.

mod bundle;
mod observation;
mod patient;
mod practitioner;

pub use bundle::*;
pub use observation::*;
pub use patient::*;
pub use practitioner::*;

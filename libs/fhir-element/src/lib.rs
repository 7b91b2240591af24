//! FHIR element tree
//!
//! This crate provides the typed, in-memory model that the ferrum codecs read
//! from and write into.
//!
//! # Module Organization
//!
//! - `element`: the object-safe [`Element`], [`Composite`] and [`Resource`] traits
//! - `descriptor`: static type descriptors used for introspection
//! - `field`: per-type field tables and the slot capabilities behind each field kind
//! - `primitive`: primitive wrappers carrying a value next to `id`/`extension` metadata
//! - `choice`: closed sum types for `value[x]`-style fields
//! - `resource`: the owned [`AnyResource`] handle used for contained resources
//! - `registry`: type-name → constructor lookup used for polymorphic decoding
//! - `datatypes`, `resources`: the concrete element and resource types
//!
//! # Design Philosophy
//!
//! - **One generic engine**: every concrete type declares a single field table
//!   with [`element_schema!`]; traversal, equality and both wire formats walk that
//!   table instead of per-type code.
//! - **Closed field kinds**: [`FieldRef`]/[`FieldMut`] are exhaustive enums, so a new
//!   field kind cannot be silently ignored by a codec.
//! - **Strongly-typed**: choice fields are Rust enums, primitives are `Primitive<K>`.
//!
//! # Example
//!
//! ```rust
//! use ferrum_element::{Element, FhirBoolean, FhirString, HumanName, Patient};
//!
//! let patient = Patient {
//!     active: Some(FhirBoolean::new(true)),
//!     name: vec![HumanName {
//!         family: Some(FhirString::new("Everyman")),
//!         ..Default::default()
//!     }],
//!     ..Default::default()
//! };
//!
//! let names: Vec<_> = patient
//!     .children(None)
//!     .iter()
//!     .map(|child| child.name)
//!     .collect();
//! assert_eq!(names, vec!["active", "name"]);
//! assert_eq!(patient.type_descriptor().name, "Patient");
//! ```

pub mod choice;
pub mod datatypes;
pub mod descriptor;
pub mod element;
pub mod equality;
pub mod error;
pub mod field;
pub mod primitive;
pub mod registry;
pub mod resource;
pub mod resources;
mod schema;
pub mod tree;

// Re-export commonly used types
pub use choice::{Choice, ChoiceMut, ChoiceRef, ChoiceSlot, ChoiceValue};
pub use datatypes::*;
pub use descriptor::{ChildDescriptor, FieldKind, TypeDescriptor, TypeKind, TypeNamespace};
pub use element::{Child, Composite, Element, QuantityValue, TypeName};
pub use error::{Error, Result};
pub use field::{FieldMut, FieldRef};
pub use primitive::*;
pub use registry::{ResourceRegistry, ResourceRegistryBuilder, StandardRegistry, TypeRegistry};
pub use resource::{AnyResource, Resource, ResourceSlot};
pub use resources::*;

//! Resource type registry
//!
//! Decoding a contained or top-level resource starts from its type name. A
//! [`TypeRegistry`] turns that name into a zero-value instance that the codec
//! then populates.
//!
//! Two implementations are provided:
//! - [`StandardRegistry`]: a compile-time perfect hash map (phf) of every
//!   resource type shipped with this crate. No allocation, no initialization.
//! - [`ResourceRegistry`]: an owned table built once through
//!   [`ResourceRegistryBuilder`], for callers that add their own resource types.
//!   It has no mutating methods after `build()`, so it can be shared behind an
//!   `Arc` freely.

use std::collections::HashMap;

use phf::phf_map;

use crate::element::TypeName;
use crate::resource::{AnyResource, Resource};
use crate::resources::{Bundle, Observation, Patient, Practitioner};

/// Produces a zero-value instance of one resource type.
pub type ResourceConstructor = fn() -> AnyResource;

pub trait TypeRegistry: Send + Sync {
    /// A fresh, empty instance of `type_name`, or `None` if unknown.
    fn lookup(&self, type_name: &str) -> Option<AnyResource>;

    fn contains(&self, type_name: &str) -> bool;
}

fn construct<R: Resource + Default>() -> AnyResource {
    AnyResource::new(R::default())
}

static STANDARD_RESOURCES: phf::Map<&'static str, ResourceConstructor> = phf_map! {
    "Bundle" => construct::<Bundle> as ResourceConstructor,
    "Observation" => construct::<Observation> as ResourceConstructor,
    "Patient" => construct::<Patient> as ResourceConstructor,
    "Practitioner" => construct::<Practitioner> as ResourceConstructor,
};

/// Registry of the resource types defined in this crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardRegistry;

impl StandardRegistry {
    /// Names of all registered resource types, sorted.
    pub fn type_names() -> Vec<&'static str> {
        let mut names: Vec<_> = STANDARD_RESOURCES.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl TypeRegistry for StandardRegistry {
    fn lookup(&self, type_name: &str) -> Option<AnyResource> {
        let constructor = STANDARD_RESOURCES.get(type_name);
        if constructor.is_none() {
            tracing::debug!(type_name, "resource type not in standard registry");
        }
        constructor.map(|construct| construct())
    }

    fn contains(&self, type_name: &str) -> bool {
        STANDARD_RESOURCES.contains_key(type_name)
    }
}

/// Immutable registry assembled with [`ResourceRegistryBuilder`].
#[derive(Debug, Clone, Default)]
pub struct ResourceRegistry {
    constructors: HashMap<&'static str, ResourceConstructor>,
}

impl ResourceRegistry {
    pub fn builder() -> ResourceRegistryBuilder {
        ResourceRegistryBuilder::default()
    }

    /// Registry holding exactly the standard resource types.
    pub fn standard() -> Self {
        Self::builder().with_standard().build()
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}

impl TypeRegistry for ResourceRegistry {
    fn lookup(&self, type_name: &str) -> Option<AnyResource> {
        let constructor = self.constructors.get(type_name);
        if constructor.is_none() {
            tracing::debug!(type_name, "resource type not registered");
        }
        constructor.map(|construct| construct())
    }

    fn contains(&self, type_name: &str) -> bool {
        self.constructors.contains_key(type_name)
    }
}

#[derive(Debug, Default)]
pub struct ResourceRegistryBuilder {
    constructors: HashMap<&'static str, ResourceConstructor>,
}

impl ResourceRegistryBuilder {
    /// Seed the builder with every [`StandardRegistry`] type.
    pub fn with_standard(mut self) -> Self {
        for (name, constructor) in STANDARD_RESOURCES.entries() {
            self.constructors.insert(*name, *constructor);
        }
        self
    }

    /// Register `R` under its type name, replacing any earlier entry.
    pub fn register<R: Resource + TypeName + Default>(mut self) -> Self {
        self.constructors.insert(R::TYPE_NAME, construct::<R>);
        self
    }

    pub fn build(self) -> ResourceRegistry {
        ResourceRegistry {
            constructors: self.constructors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn standard_registry_constructs_empty_instances() {
        let registry = StandardRegistry;
        let resource = registry.lookup("Observation").unwrap();
        assert_eq!(resource.resource_type(), "Observation");
        assert!(resource.downcast_ref::<Observation>().is_some());
        assert!(registry.lookup("Basic").is_none());
        assert!(registry.contains("Bundle"));
    }

    #[test]
    fn standard_type_names_are_sorted() {
        assert_eq!(
            StandardRegistry::type_names(),
            vec!["Bundle", "Observation", "Patient", "Practitioner"]
        );
    }

    #[test]
    fn builder_registers_selected_types() {
        let registry = ResourceRegistry::builder().register::<Patient>().build();
        assert_eq!(registry.len(), 1);
        assert!(registry.contains("Patient"));
        assert!(registry.lookup("Observation").is_none());

        let standard = ResourceRegistry::standard();
        assert_eq!(standard.len(), 4);
    }

    #[test]
    fn registry_is_shared_across_threads() {
        let registry = Arc::new(ResourceRegistry::standard());
        let handles: Vec<_> = ["Patient", "Bundle", "Practitioner"]
            .into_iter()
            .map(|name| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || registry.lookup(name).map(|r| r.resource_type()))
            })
            .collect();

        let found: Vec<_> = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect();
        assert_eq!(found, vec![Some("Patient"), Some("Bundle"), Some("Practitioner")]);
    }
}
